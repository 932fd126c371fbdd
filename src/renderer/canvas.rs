//! CanvasRenderingContext2d backend (WASM only)

use std::cell::{Ref, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::assets::{AssetCache, AssetId};
use super::scene::{Color, DrawCmd, SourceRect, TextAlign};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::GameError;

const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

fn css(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    assets: Rc<RefCell<AssetCache>>,
    images: Vec<(AssetId, HtmlImageElement)>,
    // Kept alive for as long as the images can fire
    callbacks: Vec<Closure<dyn FnMut()>>,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, GameError> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or(GameError::MissingElement("2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::Js("context is not 2d".to_string()))?;

        Ok(Self {
            ctx,
            assets: Rc::new(RefCell::new(AssetCache::new())),
            images: Vec::new(),
            callbacks: Vec::new(),
        })
    }

    /// Start fetching all sprites; each flips its cache entry on load
    pub fn load_assets(&mut self) -> Result<(), GameError> {
        for id in AssetId::ALL {
            let img = HtmlImageElement::new()?;

            let onload = {
                let assets = self.assets.clone();
                let img = img.clone();
                Closure::<dyn FnMut()>::new(move || {
                    let size = Vec2::new(img.natural_width() as f32, img.natural_height() as f32);
                    assets.borrow_mut().mark_loaded(id, size);
                })
            };
            let onerror = {
                let assets = self.assets.clone();
                Closure::<dyn FnMut()>::new(move || assets.borrow_mut().mark_failed(id))
            };

            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            img.set_src(id.path());

            self.callbacks.push(onload);
            self.callbacks.push(onerror);
            self.images.push((id, img));
        }
        Ok(())
    }

    pub fn assets(&self) -> Ref<'_, AssetCache> {
        self.assets.borrow()
    }

    fn image(&self, id: AssetId) -> Option<&HtmlImageElement> {
        if !self.assets.borrow().is_loaded(id) {
            return None;
        }
        self.images.iter().find(|(i, _)| *i == id).map(|(_, img)| img)
    }

    /// Execute a draw list. Individual failures are logged and skipped.
    pub fn draw(&self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            if let Err(e) = self.draw_one(cmd) {
                log::debug!("Draw command failed: {e:?}");
            }
        }
    }

    fn draw_one(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear => {
                ctx.clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => {
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.set_stroke_style_str(&css(*color));
                ctx.set_line_width(*width as f64);
                ctx.stroke();
            }
            DrawCmd::Rect { pos, size, color } => {
                ctx.set_fill_style_str(&css(*color));
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::RoundRect {
                pos,
                size,
                radius,
                color,
            } => {
                self.round_rect_path(*pos, *size, *radius)?;
                ctx.set_fill_style_str(&css(*color));
                ctx.fill();
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, PI * 2.0)?;
                ctx.set_fill_style_str(&css(*color));
                ctx.fill();
            }
            DrawCmd::Image {
                asset,
                crop,
                pos,
                size,
            } => {
                // Unloaded images were already replaced by fallbacks when the
                // scene was built; a race here just skips one frame
                let Some(img) = self.image(*asset) else {
                    return Ok(());
                };
                match crop {
                    Some(src) => draw_cropped(ctx, img, src, *pos, *size)?,
                    None => ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        pos.x as f64,
                        pos.y as f64,
                        size.x as f64,
                        size.y as f64,
                    )?,
                }
            }
            DrawCmd::Text {
                text,
                pos,
                size_px,
                bold,
                align,
                color,
            } => {
                let weight = if *bold { "bold " } else { "" };
                ctx.set_font(&format!("{weight}{size_px}px {FONT_FAMILY}"));
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                    TextAlign::Right => "right",
                });
                ctx.set_fill_style_str(&css(*color));
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }

    fn round_rect_path(&self, pos: Vec2, size: Vec2, radius: f32) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (x, y) = (pos.x as f64, pos.y as f64);
        let (w, h) = (size.x as f64, size.y as f64);
        let r = (radius as f64).min(w / 2.0).min(h / 2.0);

        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r)?;
        ctx.arc_to(x + w, y + h, x, y + h, r)?;
        ctx.arc_to(x, y + h, x, y, r)?;
        ctx.arc_to(x, y, x + w, y, r)?;
        ctx.close_path();
        Ok(())
    }
}

fn draw_cropped(
    ctx: &CanvasRenderingContext2d,
    img: &HtmlImageElement,
    src: &SourceRect,
    pos: Vec2,
    size: Vec2,
) -> Result<(), JsValue> {
    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        img,
        src.origin.x as f64,
        src.origin.y as f64,
        src.size.x as f64,
        src.size.y as f64,
        pos.x as f64,
        pos.y as f64,
        size.x as f64,
        size.y as f64,
    )
}

impl Drop for CanvasRenderer {
    fn drop(&mut self) {
        for (_, img) in &self.images {
            img.set_onload(None);
            img.set_onerror(None);
        }
    }
}

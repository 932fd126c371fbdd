//! On-canvas text lookup
//!
//! The surrounding page owns language selection; the game only needs a
//! key -> string lookup for the few labels it draws.

use serde::{Deserialize, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

/// Source of display strings
pub trait TextProvider {
    /// Translation for `key`, or the key itself when none exists
    fn text<'a>(&'a self, key: &'a str) -> &'a str;
}

const ES: &[(&str, &str)] = &[
    ("gameStart", "PRESIONA ESPACIO PARA EMPEZAR"),
    ("gameStartMobile", "TOUCH PARA EMPEZAR"),
    ("gameOver", "FIN DEL JUEGO"),
    ("gameNewHighScore", "¡NUEVO RÉCORD!"),
    ("gameRestart", "PRESIONA ESPACIO PARA REINICIAR"),
    ("gameRestartMobile", "TOUCH PARA REINICIAR"),
    ("gameScore", "Puntaje"),
    ("gameHighScore", "Puntaje Máximo"),
    ("gameHighScoreMobile", "Máximo"),
    ("gameModeClassic", "Clásico"),
    ("gameModeInsane", "Locura"),
    ("gameShoot", "Disparar"),
];

const EN: &[(&str, &str)] = &[
    ("gameStart", "PRESS SPACE TO START"),
    ("gameStartMobile", "TOUCH TO START"),
    ("gameOver", "GAME OVER"),
    ("gameNewHighScore", "NEW HIGH SCORE!"),
    ("gameRestart", "PRESS SPACE TO RESTART"),
    ("gameRestartMobile", "TOUCH TO RESTART"),
    ("gameScore", "Score"),
    ("gameHighScore", "High Score"),
    ("gameHighScoreMobile", "Best"),
    ("gameModeClassic", "Classic"),
    ("gameModeInsane", "Insane"),
    ("gameShoot", "Shoot"),
];

/// Built-in string tables
#[derive(Debug, Clone, Copy, Default)]
pub struct Translations {
    pub language: Language,
}

impl Translations {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self.language {
            Language::Es => ES,
            Language::En => EN,
        }
    }
}

impl TextProvider for Translations {
    fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.table()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(key)
    }
}

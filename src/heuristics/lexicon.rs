use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::ZoneId;

/// Language pack selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    /// Static lexicon for this language
    pub fn lexicon(self) -> &'static Lexicon {
        match self {
            Language::English => &ENGLISH,
            Language::Spanish => &SPANISH,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => f.write_str("en"),
            Language::Spanish => f.write_str("es"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "es" | "spanish" | "español" | "espanol" => Ok(Language::Spanish),
            other => Err(format!("unsupported language '{}' (expected en or es)", other)),
        }
    }
}

/// A canonical label and the phrases that trigger it
pub type LabelTriggers = (&'static str, &'static [&'static str]);

/// Localized suggestion messages
#[derive(Debug)]
pub struct SuggestionText {
    pub add_zones: &'static str,
    pub add_warm_up: &'static str,
    pub add_cool_down: &'static str,
    pub add_distance: &'static str,
    pub add_stroke: &'static str,
}

/// Localized texts for the degraded remote response
#[derive(Debug)]
pub struct FallbackText {
    pub reasoning: &'static str,
    pub suggestions: [&'static str; 2],
}

/// Trigger phrases and messages for one language.
///
/// All phrases are lowercase and matched as whole words.
#[derive(Debug)]
pub struct Lexicon {
    pub language: Language,
    /// Zone triggers indexed by `ZoneId::index`
    pub zones: [&'static [&'static str]; 5],
    pub strokes: &'static [LabelTriggers],
    pub intensities: &'static [LabelTriggers],
    pub suggestions: SuggestionText,
    pub fallback: FallbackText,
}

impl Lexicon {
    pub fn zone_triggers(&self, zone: ZoneId) -> &'static [&'static str] {
        self.zones[zone.index()]
    }
}

pub static ENGLISH: Lexicon = Lexicon {
    language: Language::English,
    zones: [
        &[
            "z1", "zone 1", "recovery", "easy", "warm up", "warm-up", "warmup", "cool down",
            "cool-down", "cooldown", "loosen",
        ],
        &["z2", "zone 2", "aerobic", "base", "endurance", "steady"],
        &["z3", "zone 3", "tempo", "moderate", "race pace"],
        &["z4", "zone 4", "threshold", "lactate", "css", "hard"],
        &["z5", "zone 5", "vo2", "vo2max", "max", "all out"],
    ],
    strokes: &[
        ("freestyle", &["freestyle", "free", "crawl", "fr"]),
        ("backstroke", &["backstroke", "bk"]),
        ("breaststroke", &["breaststroke", "breast", "br"]),
        ("butterfly", &["butterfly", "fly"]),
        ("im", &["im", "medley", "individual medley"]),
    ],
    intensities: &[
        ("easy", &["easy", "relaxed", "smooth"]),
        ("moderate", &["moderate", "steady"]),
        ("hard", &["hard", "strong"]),
        ("fast", &["fast", "quick"]),
        ("sprint", &["sprint", "sprints"]),
        ("build", &["build", "descend", "negative split"]),
    ],
    suggestions: SuggestionText {
        add_zones: "Add zone vocabulary (e.g. Z2, aerobic, threshold) so sets can be classified",
        add_warm_up: "Consider adding a warm-up (Z1) before the main set",
        add_cool_down: "Add a cool-down (Z1) after high-intensity work",
        add_distance: "Specify distances for each set (e.g. 4x100m, 1.5km)",
        add_stroke: "Name the stroke for each set (e.g. freestyle, backstroke)",
    },
    fallback: FallbackText {
        reasoning: "Automatic zone detection is unavailable; the zone distribution needs to be completed manually.",
        suggestions: [
            "Enter the meters for each zone manually",
            "Describe sets with distances and zone keywords for automatic detection",
        ],
    },
};

pub static SPANISH: Lexicon = Lexicon {
    language: Language::Spanish,
    zones: [
        &[
            "z1", "zona 1", "recuperación", "recuperacion", "suave", "calentamiento",
            "vuelta a la calma", "enfriamiento", "regenerativo",
        ],
        &["z2", "zona 2", "aeróbico", "aerobico", "base", "resistencia", "continuo"],
        &["z3", "zona 3", "tempo", "moderado", "ritmo de carrera"],
        &["z4", "zona 4", "umbral", "láctico", "lactico", "css", "fuerte"],
        &["z5", "zona 5", "vo2", "vo2max", "máximo", "maximo", "a tope"],
    ],
    strokes: &[
        ("freestyle", &["libre", "crol", "crawl"]),
        ("backstroke", &["espalda"]),
        ("breaststroke", &["braza", "pecho"]),
        ("butterfly", &["mariposa"]),
        ("im", &["estilos", "combinado"]),
    ],
    intensities: &[
        ("easy", &["suave", "tranquilo"]),
        ("moderate", &["moderado", "constante"]),
        ("hard", &["fuerte", "intenso"]),
        ("fast", &["rápido", "rapido"]),
        ("sprint", &["sprint", "velocidad"]),
        ("build", &["progresivo", "descendente"]),
    ],
    suggestions: SuggestionText {
        add_zones: "Añade vocabulario de zonas (p. ej. Z2, aeróbico, umbral) para clasificar las series",
        add_warm_up: "Considera añadir un calentamiento (Z1) antes de la serie principal",
        add_cool_down: "Añade una vuelta a la calma (Z1) después del trabajo intenso",
        add_distance: "Indica la distancia de cada serie (p. ej. 4x100m, 1.5km)",
        add_stroke: "Indica el estilo de cada serie (p. ej. libre, espalda)",
    },
    fallback: FallbackText {
        reasoning: "La detección automática de zonas no está disponible; completa la distribución de zonas manualmente.",
        suggestions: [
            "Introduce los metros de cada zona manualmente",
            "Describe las series con distancias y zonas para la detección automática",
        ],
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_zone_has_triggers() {
        for language in [Language::English, Language::Spanish] {
            let lexicon = language.lexicon();
            assert_eq!(lexicon.language, language);
            for zone in ZoneId::ALL {
                assert!(!lexicon.zone_triggers(zone).is_empty(), "{} {}", language, zone);
            }
        }
    }

    #[test]
    fn test_triggers_are_lowercase() {
        for lexicon in [&ENGLISH, &SPANISH] {
            let labelled = lexicon.strokes.iter().chain(lexicon.intensities.iter());
            let phrases = lexicon
                .zones
                .iter()
                .flat_map(|z| z.iter())
                .chain(labelled.flat_map(|(_, t)| t.iter()));
            for phrase in phrases {
                assert_eq!(*phrase, phrase.to_lowercase());
            }
        }
    }

    #[test]
    fn test_parse_language() {
        assert_eq!("ES".parse::<Language>().unwrap(), Language::Spanish);
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
        assert!("fr".parse::<Language>().is_err());
    }
}

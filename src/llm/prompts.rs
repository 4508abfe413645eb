use crate::heuristics::Language;
use crate::models::RemoteClassificationRequest;

/// Fixed instruction describing the zones and the reply shape
pub const SYSTEM_PROMPT_EN: &str = r#"You are a swim coach classifying a training session into intensity zones.

ZONES:
- z1: recovery, warm-up, cool-down, easy swimming
- z2: aerobic base, steady endurance
- z3: tempo, moderate, race-pace aerobic work
- z4: threshold, lactate, CSS pace
- z5: VO2max, maximal efforts, sprints

RULES:
1. Attribute the session's distance, in meters, to the zones above.
2. Expand repeat notation: 10x200m is 2000 meters.
3. If uncertain, lower your confidence instead of guessing.

Reply with a single JSON object and nothing else:
{"z1": <meters>, "z2": <meters>, "z3": <meters>, "z4": <meters>, "z5": <meters>, "confidence": <0-100>, "reasoning": "<one or two sentences>", "suggestions": ["<short tip>", ...]}"#;

/// Spanish variant of `SYSTEM_PROMPT_EN`
pub const SYSTEM_PROMPT_ES: &str = r#"Eres un entrenador de natación que clasifica una sesión en zonas de intensidad.

ZONAS:
- z1: recuperación, calentamiento, vuelta a la calma, nado suave
- z2: base aeróbica, resistencia continua
- z3: tempo, moderado, ritmo de carrera aeróbico
- z4: umbral, láctico, ritmo CSS
- z5: VO2max, esfuerzos máximos, sprints

REGLAS:
1. Reparte la distancia de la sesión, en metros, entre las zonas.
2. Expande las repeticiones: 10x200m son 2000 metros.
3. Si dudas, baja la confianza en lugar de adivinar.

Responde con un único objeto JSON y nada más:
{"z1": <metros>, "z2": <metros>, "z3": <metros>, "z4": <metros>, "z5": <metros>, "confidence": <0-100>, "reasoning": "<una o dos frases>", "suggestions": ["<consejo breve>", ...]}"#;

pub fn system_prompt(language: Language) -> &'static str {
    match language {
        Language::English => SYSTEM_PROMPT_EN,
        Language::Spanish => SYSTEM_PROMPT_ES,
    }
}

/// Build the user prompt for a classification request
pub fn build_classification_prompt(request: &RemoteClassificationRequest) -> String {
    let mut prompt = String::new();

    prompt.push_str("# Session\n");
    prompt.push_str(request.text.trim());
    prompt.push_str("\n\n");

    if request.objective.is_some() || request.time_slot.is_some() {
        prompt.push_str("# Context\n");
        if let Some(objective) = &request.objective {
            prompt.push_str(&format!("Objective: {}\n", objective));
        }
        if let Some(slot) = request.time_slot {
            prompt.push_str(&format!("Time of day: {}\n", slot));
        }
        prompt.push('\n');
    }

    prompt.push_str("Classify the session and reply with the JSON object only.\n");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;

    #[test]
    fn test_prompt_includes_context() {
        let request = RemoteClassificationRequest::new("  8x100m threshold ")
            .with_objective("400m race prep")
            .with_time_slot(TimeSlot::Morning);

        let prompt = build_classification_prompt(&request);

        assert!(prompt.contains("8x100m threshold\n"));
        assert!(prompt.contains("Objective: 400m race prep"));
        assert!(prompt.contains("Time of day: morning"));
    }

    #[test]
    fn test_prompt_without_context() {
        let prompt = build_classification_prompt(&RemoteClassificationRequest::new("1km easy"));
        assert!(!prompt.contains("# Context"));
    }

    #[test]
    fn test_system_prompts_describe_reply_keys() {
        for language in [Language::English, Language::Spanish] {
            let prompt = system_prompt(language);
            for key in ["\"z1\"", "\"z5\"", "\"confidence\"", "\"reasoning\"", "\"suggestions\""] {
                assert!(prompt.contains(key), "{} missing {}", language, key);
            }
        }
    }
}

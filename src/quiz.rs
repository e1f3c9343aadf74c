//! # Quiz Definition
//!
//! The ten-question quiz served to the frontend. Option `value` tokens are
//! the classifier vocabulary, labels are what the user sees.
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct QuestionOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Question {
    pub id: u8,
    pub text: &'static str,
    pub icon: &'static str,
    pub options: &'static [QuestionOption],
}

pub const QUESTIONS: [Question; 10] = [
    Question {
        id: 1,
        text: "Ao longo do dia, a tua pele costuma:",
        icon: "🧴",
        options: &[
            QuestionOption { label: "Ficar muito oleosa e a brilhar", value: "oily" },
            QuestionOption { label: "Ficar normal", value: "normal" },
            QuestionOption { label: "Ficar seca ou a repuxar", value: "dry" },
            QuestionOption { label: "Ficar oleosa só na testa e no nariz", value: "mixed" },
        ],
    },
    Question {
        id: 2,
        text: "Depois de lavares o rosto (com água ou sabão), a tua pele:",
        icon: "🚿",
        options: &[
            QuestionOption { label: "Fica confortável", value: "normal" },
            QuestionOption { label: "Fica oleosa rapidamente", value: "oily" },
            QuestionOption { label: "Fica seca e repuxa", value: "dry" },
            QuestionOption { label: "Arde ou fica vermelha", value: "sensitive" },
        ],
    },
    Question {
        id: 3,
        text: "Com que frequência tens espinhas ou borbulhas?",
        icon: "😖",
        options: &[
            QuestionOption { label: "Quase sempre", value: "acne" },
            QuestionOption { label: "Às vezes", value: "mixed" },
            QuestionOption { label: "Raramente", value: "normal" },
            QuestionOption { label: "Quase nunca", value: "dry" },
        ],
    },
    Question {
        id: 4,
        text: "A tua pele costuma:",
        icon: "🔥",
        options: &[
            QuestionOption { label: "Arder ou coçar com alguns produtos", value: "sensitive_high" },
            QuestionOption { label: "Ficar vermelha facilmente", value: "sensitive" },
            QuestionOption { label: "Não reagir quase nunca", value: "resilient" },
        ],
    },
    Question {
        id: 5,
        text: "Quando estás muito tempo ao sol, a tua pele:",
        icon: "🌞",
        options: &[
            QuestionOption { label: "Fica muito oleosa", value: "oily" },
            QuestionOption { label: "Fica normal", value: "normal" },
            QuestionOption { label: "Fica seca ou sensível", value: "dry_sensitive" },
            QuestionOption { label: "Mancha com facilidade", value: "spots" },
        ],
    },
    Question {
        id: 6,
        text: "Usas maquilhagem?",
        icon: "💄",
        options: &[
            QuestionOption { label: "Sim, quase todos os dias", value: "daily" },
            QuestionOption { label: "Às vezes", value: "sometimes" },
            QuestionOption { label: "Raramente", value: "rarely" },
            QuestionOption { label: "Não uso maquilhagem", value: "never" },
        ],
    },
    Question {
        id: 7,
        text: "Ao acordar de manhã, a tua pele costuma:",
        icon: "💦",
        options: &[
            QuestionOption { label: "Estar oleosa", value: "oily" },
            QuestionOption { label: "Estar normal", value: "normal" },
            QuestionOption { label: "Estar seca", value: "dry" },
            QuestionOption { label: "Estar irritada ou sensível", value: "sensitive" },
        ],
    },
    Question {
        id: 8,
        text: "Quantas vezes lavas o rosto por dia?",
        icon: "🧼",
        options: &[
            QuestionOption { label: "1 vez", value: "1x" },
            QuestionOption { label: "2 vezes", value: "2x" },
            QuestionOption { label: "Mais de 2 vezes", value: "3x" },
            QuestionOption { label: "Quase não lavo", value: "0x" },
        ],
    },
    Question {
        id: 9,
        text: "Em dias de calor ou humidade, a tua pele:",
        icon: "🌬️",
        options: &[
            QuestionOption { label: "Fica muito oleosa", value: "oily" },
            QuestionOption { label: "Fica normal", value: "normal" },
            QuestionOption { label: "Fica desconfortável", value: "sensitive" },
            QuestionOption { label: "Dá mais borbulhas", value: "acne" },
        ],
    },
    Question {
        id: 10,
        text: "Qual dessas situações mais te incomoda hoje?",
        icon: "🪞",
        options: &[
            QuestionOption { label: "Oleosidade excessiva", value: "oily" },
            QuestionOption { label: "Borbulhas / espinhas", value: "acne" },
            QuestionOption { label: "Pele seca ou a repuxar", value: "dry" },
            QuestionOption { label: "Manchas", value: "spots" },
            QuestionOption { label: "Sensibilidade", value: "sensitive" },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skin::token_bucket;

    #[test]
    fn ids_are_sequential() {
        for (index, question) in QUESTIONS.iter().enumerate() {
            assert_eq!(question.id as usize, index + 1);
        }
    }

    #[test]
    fn every_option_token_votes_for_a_bucket() {
        for question in &QUESTIONS {
            for option in question.options {
                assert!(
                    token_bucket(option.value).is_some(),
                    "question {} token {:?} maps to no bucket",
                    question.id,
                    option.value
                );
            }
        }
    }
}

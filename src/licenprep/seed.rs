//! Built-in starter content.
//!
//! A fresh install opens with one textbook, three practice questions and a
//! sample progress profile. Persisted state is merged over these values at
//! startup, field by field.

use crate::model::{
    Answer, Difficulty, Mcq, Settings, SystemProgress, Textbook, TextbookStatus, UserStats,
};
use chrono::Utc;

pub const SEED_STREAK: u32 = 7;

pub fn textbooks() -> Vec<Textbook> {
    vec![Textbook {
        id: "tb1".to_string(),
        title: "First Aid for the USMLE Step 1".to_string(),
        pages: 816,
        uploaded_at: Utc::now(),
        status: TextbookStatus::Processed,
        mime_type: "application/pdf".to_string(),
        chapters: vec![
            "Biochemistry".to_string(),
            "Immunology".to_string(),
            "Microbiology".to_string(),
            "Pathology".to_string(),
        ],
    }]
}

fn answers(options: [(&str, &str); 4]) -> Vec<Answer> {
    options
        .iter()
        .map(|(id, text)| Answer::new(*id, *text))
        .collect()
}

pub fn mcqs() -> Vec<Mcq> {
    vec![
        Mcq {
            id: "q1".to_string(),
            stem: "A 45-year-old male presents with progressive muscle weakness and difficulty \
                   swallowing. Physical examination reveals fasciculations of the tongue. What is \
                   the most likely diagnosis?"
                .to_string(),
            answers: answers([
                ("a", "Multiple Sclerosis"),
                ("b", "Amyotrophic Lateral Sclerosis"),
                ("c", "Myasthenia Gravis"),
                ("d", "Guillain-Barré Syndrome"),
            ]),
            correct_answer: "b".to_string(),
            explanation: "The combination of upper and lower motor neuron signs, including tongue \
                          fasciculations, suggests ALS."
                .to_string(),
            difficulty: Difficulty::Medium,
            category: "Neurology".to_string(),
            last_practiced: None,
        },
        Mcq {
            id: "q2".to_string(),
            stem: "Which enzyme deficiency is associated with Tay-Sachs disease?".to_string(),
            answers: answers([
                ("a", "Hexosaminidase A"),
                ("b", "Glucocerebrosidase"),
                ("c", "Sphingomyelinase"),
                ("d", "α-Galactosidase A"),
            ]),
            correct_answer: "a".to_string(),
            explanation: "Tay-Sachs disease is caused by deficiency of hexosaminidase A, leading \
                          to GM2 ganglioside accumulation."
                .to_string(),
            difficulty: Difficulty::Easy,
            category: "Biochemistry".to_string(),
            last_practiced: None,
        },
        Mcq {
            id: "q3".to_string(),
            stem: "A patient with a BMI of 28 kg/m² and type 2 diabetes presents with an elevated \
                   HbA1c of 8.2%. What is the most appropriate first-line treatment?"
                .to_string(),
            answers: answers([
                ("a", "Insulin glargine"),
                ("b", "Metformin"),
                ("c", "Sitagliptin"),
                ("d", "Glimepiride"),
            ]),
            correct_answer: "b".to_string(),
            explanation: "Metformin is the first-line treatment for type 2 diabetes, especially in \
                          overweight or obese patients."
                .to_string(),
            difficulty: Difficulty::Medium,
            category: "Endocrinology".to_string(),
            last_practiced: None,
        },
    ]
}

pub fn system_progress() -> Vec<SystemProgress> {
    [
        ("Cardiovascular", 68),
        ("Respiratory", 42),
        ("Gastrointestinal", 55),
        ("Renal", 23),
        ("Neurology", 77),
        ("Endocrinology", 39),
        ("Hematology", 51),
        ("Immunology", 65),
    ]
    .into_iter()
    .map(|(system, progress)| SystemProgress::new(system, progress))
    .collect()
}

pub fn user_stats() -> UserStats {
    UserStats {
        questions_answered: 213,
        correct_answers: 164,
        time_spent: 1234,
        last_active: Utc::now(),
    }
}

pub fn settings() -> Settings {
    Settings::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_questions_are_well_formed() {
        let mcqs = mcqs();
        assert_eq!(mcqs.len(), 3);
        for mcq in &mcqs {
            mcq.validate().unwrap();
        }
    }

    #[test]
    fn seed_stats_respect_bounds() {
        let stats = user_stats();
        assert!(stats.correct_answers <= stats.questions_answered);
        assert!(system_progress().iter().all(|s| s.progress <= 100));
    }
}

//! Offline goals interview: a fixed list of questions whose answers fill
//! the GOALS.md template.

use anyhow::Result;

use crate::goals::{Answer, AnswerSet, QuestionKey};
use crate::ui::Console;
use crate::ui::prompt::answer_label;

pub struct Question {
    pub key: QuestionKey,
    pub text: &'static str,
    pub hint: Option<&'static str>,
    pub optional: bool,
    /// Only asked when this earlier question got an answer.
    pub follows: Option<QuestionKey>,
    /// Printed before the question when it is asked.
    pub lead_in: Option<&'static str>,
}

pub struct Section {
    pub title: &'static str,
    pub intro: Option<&'static str>,
    pub questions: &'static [Question],
}

const fn question(key: QuestionKey, text: &'static str, hint: Option<&'static str>) -> Question {
    Question {
        key,
        text,
        hint,
        optional: false,
        follows: None,
        lead_in: None,
    }
}

const fn optional(key: QuestionKey, text: &'static str, hint: Option<&'static str>) -> Question {
    Question {
        optional: true,
        ..question(key, text, hint)
    }
}

pub const SECTIONS: &[Section] = &[
    Section {
        title: "1. Current Situation",
        intro: None,
        questions: &[
            question(
                QuestionKey::Role,
                "What's your current role?",
                Some("Product Manager, Senior Engineer, Founder, VP Product"),
            ),
            optional(QuestionKey::Company, "What company or organization?", None),
        ],
    },
    Section {
        title: "2. Vision & Direction",
        intro: None,
        questions: &[
            question(
                QuestionKey::Vision,
                "What's your primary professional vision? What are you building toward?",
                Some("Become VP Product, Launch a successful product, Build a thriving consultancy"),
            ),
            Question {
                follows: Some(QuestionKey::Vision),
                lead_in: Some("Tell me more about that vision..."),
                ..optional(
                    QuestionKey::VisionExpanded,
                    "What would achieving this enable? Why does it matter to you?",
                    None,
                )
            },
        ],
    },
    Section {
        title: "3. Success Criteria",
        intro: None,
        questions: &[
            question(
                QuestionKey::Success12Mo,
                "In 12 months, what would make you think 'this was a successful year'?",
                Some("Shipped 3 major features, Built a team of 10, Became recognized expert in my field"),
            ),
            optional(
                QuestionKey::Success5Yr,
                "What's your 5-year north star? Where do you want to be?",
                None,
            ),
        ],
    },
    Section {
        title: "4. Current Focus",
        intro: None,
        questions: &[
            question(
                QuestionKey::CurrentFocus,
                "What are you actively working on right now?",
                Some("Product roadmap, Team building, User research initiative"),
            ),
            question(
                QuestionKey::Q1Goals,
                "What are your objectives for THIS QUARTER (next 90 days)?",
                Some("Launch new feature, Improve activation by 20%, Build PM practice"),
            ),
            Question {
                follows: Some(QuestionKey::Q1Goals),
                ..optional(
                    QuestionKey::Q1Metrics,
                    "How will you measure success on those quarterly objectives?",
                    Some("User adoption, Revenue, Team satisfaction, Thought leadership metrics"),
                )
            },
        ],
    },
    Section {
        title: "5. Development & Growth",
        intro: None,
        questions: &[
            optional(
                QuestionKey::Skills,
                "What skills do you need to develop to achieve your vision?",
                Some("Data analysis, Technical architecture, Strategic communication, AI/ML"),
            ),
            optional(
                QuestionKey::Relationships,
                "What key relationships or network do you need to build?",
                Some("Engineering leaders, Design partners, Industry experts, Executive stakeholders"),
            ),
        ],
    },
    Section {
        title: "6. Challenges & Opportunities",
        intro: None,
        questions: &[
            optional(
                QuestionKey::Challenges,
                "What's currently blocking you or slowing you down?",
                Some("Time management, Technical knowledge gaps, Cross-functional alignment"),
            ),
            optional(
                QuestionKey::Opportunities,
                "What opportunities are you exploring or considering?",
                Some("Speaking engagements, Product launches, Team expansion, Strategic partnerships"),
            ),
        ],
    },
    Section {
        title: "7. Priority Setting",
        intro: Some("Finally, let's get crystal clear on priorities..."),
        questions: &[question(
            QuestionKey::Priorities,
            "What are your TOP 3 PRIORITIES right now? (Be brutally honest)",
            Some("1. Ship Q1 roadmap, 2. Build thought leadership, 3. Develop AI product skills"),
        )],
    },
];

/// Walk every section and collect answers.
///
/// Empty responses are recorded as skipped and never re-asked; follow-up
/// questions are only put when their parent was answered.
pub fn collect_answers<C: Console>(console: &mut C) -> Result<AnswerSet> {
    console.section("Manual Goals Setup");
    console.note("I'll ask you some questions to understand your goals and priorities.");
    console.note("This will help your AI agent make smarter decisions about task priorities.");
    console.note("Be honest and specific - this is for you, not anyone else.");
    console.note("You can always edit GOALS.md later to refine your thinking.");

    let mut answers = AnswerSet::new();

    for section in SECTIONS {
        console.section(section.title);
        if let Some(intro) = section.intro {
            console.note(intro);
        }

        for q in section.questions {
            if let Some(parent) = q.follows
                && answers.text(parent).is_none()
            {
                tracing::debug!("Skipping {} ({parent} unanswered)", q.key);
                continue;
            }

            if let Some(lead_in) = q.lead_in {
                console.note(lead_in);
            }
            console.question(q.text, q.hint);
            let input = console.read_line(&answer_label(q.optional))?;
            answers.record(q.key, Answer::from_input(&input));
        }
    }

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::console::scripted::ScriptedConsole;

    fn all_questions() -> impl Iterator<Item = &'static Question> {
        SECTIONS.iter().flat_map(|s| s.questions.iter())
    }

    #[test]
    fn questions_cover_every_key_in_order() {
        let keys: Vec<QuestionKey> = all_questions().map(|q| q.key).collect();
        assert_eq!(keys, QuestionKey::ALL);
    }

    #[test]
    fn follow_ups_come_after_their_parent() {
        let keys: Vec<QuestionKey> = all_questions().map(|q| q.key).collect();
        for q in all_questions() {
            if let Some(parent) = q.follows {
                let parent_pos = keys.iter().position(|k| *k == parent).unwrap();
                let pos = keys.iter().position(|k| *k == q.key).unwrap();
                assert!(parent_pos < pos, "{} asked before {parent}", q.key);
            }
        }
    }

    #[test]
    fn full_run_records_every_answer() {
        let inputs: Vec<String> = QuestionKey::ALL.iter().map(|k| format!("about {k}")).collect();
        let mut console = ScriptedConsole::new(inputs);

        let answers = collect_answers(&mut console).unwrap();

        for key in QuestionKey::ALL {
            assert_eq!(answers.text(key), Some(format!("about {key}").as_str()));
        }
        assert_eq!(console.remaining(), 0);
        assert_eq!(console.questions.len(), 14);
        assert!(console.notes.iter().any(|n| n == "Tell me more about that vision..."));
    }

    #[test]
    fn empty_parents_skip_follow_ups() {
        // role, company, vision (empty), success_12mo, success_5yr,
        // current_focus, q1_goals (empty), skills, relationships,
        // challenges, opportunities, priorities
        let mut inputs = vec![String::new(); 12];
        inputs[0] = "Founder".to_string();
        let mut console = ScriptedConsole::new(inputs);

        let answers = collect_answers(&mut console).unwrap();

        assert_eq!(answers.get(QuestionKey::VisionExpanded), None);
        assert_eq!(answers.get(QuestionKey::Q1Metrics), None);
        assert_eq!(answers.get(QuestionKey::Vision), Some(&Answer::Skipped));
        assert_eq!(answers.text(QuestionKey::Role), Some("Founder"));
        assert_eq!(console.questions.len(), 12);
        assert!(!console.notes.iter().any(|n| n.contains("Tell me more")));
        assert_eq!(console.remaining(), 0);
    }

    #[test]
    fn answered_parents_always_offer_follow_ups() {
        let mut inputs = vec![String::new(); 14];
        inputs[2] = "Build a studio".to_string();
        inputs[7] = "Ship v2".to_string();
        let mut console = ScriptedConsole::new(inputs);

        let answers = collect_answers(&mut console).unwrap();

        assert_eq!(answers.get(QuestionKey::VisionExpanded), Some(&Answer::Skipped));
        assert_eq!(answers.get(QuestionKey::Q1Metrics), Some(&Answer::Skipped));
        assert!(console.questions.iter().any(|q| q.contains("Why does it matter")));
        assert!(console.questions.iter().any(|q| q.contains("measure success")));
    }

    #[test]
    fn optional_questions_advertise_skipping() {
        let mut console = ScriptedConsole::new(vec![String::new(); 12]);
        collect_answers(&mut console).unwrap();

        // role is required, company optional
        assert_eq!(console.prompts[0], answer_label(false));
        assert_eq!(console.prompts[1], answer_label(true));
    }

    #[test]
    fn running_out_of_input_is_an_error() {
        let mut console = ScriptedConsole::new(["Founder"]);
        assert!(collect_answers(&mut console).is_err());
    }
}

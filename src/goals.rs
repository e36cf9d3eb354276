//! The GOALS.md document: answer model and template rendering.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Title line of GOALS.md. Its appearance in a Claude reply means the
/// document is ready.
pub const DOCUMENT_MARKER: &str = "# Goals & Strategic Direction";

/// One slot of the goals template, in questionnaire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionKey {
    Role,
    Company,
    Vision,
    VisionExpanded,
    Success12Mo,
    Success5Yr,
    CurrentFocus,
    Q1Goals,
    Q1Metrics,
    Skills,
    Relationships,
    Challenges,
    Opportunities,
    Priorities,
}

impl QuestionKey {
    pub const ALL: [Self; 14] = [
        Self::Role,
        Self::Company,
        Self::Vision,
        Self::VisionExpanded,
        Self::Success12Mo,
        Self::Success5Yr,
        Self::CurrentFocus,
        Self::Q1Goals,
        Self::Q1Metrics,
        Self::Skills,
        Self::Relationships,
        Self::Challenges,
        Self::Opportunities,
        Self::Priorities,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Company => "company",
            Self::Vision => "vision",
            Self::VisionExpanded => "vision_expanded",
            Self::Success12Mo => "success_12mo",
            Self::Success5Yr => "success_5yr",
            Self::CurrentFocus => "current_focus",
            Self::Q1Goals => "q1_goals",
            Self::Q1Metrics => "q1_metrics",
            Self::Skills => "skills",
            Self::Relationships => "relationships",
            Self::Challenges => "challenges",
            Self::Opportunities => "opportunities",
            Self::Priorities => "priorities",
        }
    }

    /// Text rendered in place of an unanswered slot.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Role => "[Your current role]",
            Self::Company => "[Your company]",
            Self::Vision => "[Your long-term vision]",
            Self::VisionExpanded => "[Why this vision matters to you]",
            Self::Success12Mo => "[What success looks like in 12 months]",
            Self::Success5Yr => "[Your 5-year north star]",
            Self::CurrentFocus => "[What you're actively working on]",
            Self::Q1Goals => "[This quarter's objectives]",
            Self::Q1Metrics => "[How you'll measure success]",
            Self::Skills => "[Skills to develop]",
            Self::Relationships => "[Key relationships to build]",
            Self::Challenges => "[Current blockers or challenges]",
            Self::Opportunities => "[Opportunities you're exploring]",
            Self::Priorities => "[Your top 3 priorities]",
        }
    }
}

impl std::fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the operator did with a question that was put to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Given(String),
    /// Asked, but left empty.
    Skipped,
}

impl Answer {
    /// Build an answer from a raw line of input.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Self::Skipped
        } else {
            Self::Given(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Given(text) => Some(text),
            Self::Skipped => None,
        }
    }
}

/// Answers collected by the questionnaire. A key that was never asked is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    answers: BTreeMap<QuestionKey, Answer>,
}

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: QuestionKey, answer: Answer) {
        self.answers.insert(key, answer);
    }

    #[must_use]
    pub fn get(&self, key: QuestionKey) -> Option<&Answer> {
        self.answers.get(&key)
    }

    /// The given answer for `key`, if any.
    #[must_use]
    pub fn text(&self, key: QuestionKey) -> Option<&str> {
        self.get(key).and_then(Answer::text)
    }

    fn slot(&self, key: QuestionKey) -> &str {
        self.text(key).unwrap_or_else(|| key.placeholder())
    }
}

/// Format a date the way the document header shows it, e.g. `March 04, 2026`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Render GOALS.md from a set of answers.
///
/// Unanswered slots get their placeholder; every static section is
/// always present.
#[must_use]
pub fn render(answers: &AnswerSet, date: NaiveDate) -> String {
    use QuestionKey as K;

    let mut vision = answers.slot(K::Vision).to_string();
    if let Some(expanded) = answers.text(K::VisionExpanded) {
        vision.push_str("\n\n");
        vision.push_str(expanded);
    }

    format!(
        "{DOCUMENT_MARKER}

*Last updated: {date}*

## Current Context

### Role & Responsibilities
{role} at {company}

### Primary Vision
{vision}

## Success Criteria

### 12-Month Horizon
{success_12mo}

### 5-Year North Star
{success_5yr}

## Current Focus Areas

### What I'm Working On
{current_focus}

### This Quarter's Objectives
{q1_goals}

**Success Metrics:**
{q1_metrics}

### Skill Development
{skills}

### Key Relationships & Network Building
{relationships}

## Strategic Context

### Challenges & Blockers
{challenges}

### Opportunities to Explore
{opportunities}

{PRIORITY_FRAMEWORK}
## Top 3 Priorities (Right Now)

{priorities}

{REVIEW_SECTIONS}",
        date = format_date(date),
        role = answers.slot(K::Role),
        company = answers.slot(K::Company),
        success_12mo = answers.slot(K::Success12Mo),
        success_5yr = answers.slot(K::Success5Yr),
        current_focus = answers.slot(K::CurrentFocus),
        q1_goals = answers.slot(K::Q1Goals),
        q1_metrics = answers.slot(K::Q1Metrics),
        skills = answers.slot(K::Skills),
        relationships = answers.slot(K::Relationships),
        challenges = answers.slot(K::Challenges),
        opportunities = answers.slot(K::Opportunities),
        priorities = answers.slot(K::Priorities),
    )
}

pub const PRIORITY_FRAMEWORK: &str = "## Priority Framework

When evaluating new tasks and commitments:

**P0 (Critical/Urgent)** - Must do THIS WEEK:
- Directly advances quarterly objectives
- Time-sensitive opportunities
- Critical stakeholder communication
- Immediate blockers to remove

**P1 (Important)** - This month:
- Builds key skills or expertise
- Advances product strategy
- Significant career development
- High-value learning opportunities

**P2 (Normal)** - Scheduled work:
- Supports broader objectives
- Maintains stakeholder relationships
- Operational efficiency
- General learning and exploration

**P3 (Low)** - Nice to have:
- Administrative tasks
- Speculative projects
- Activities without clear advancement value
";

pub const REVIEW_SECTIONS: &str = "## Decision Filters

Before saying YES to anything, ask:
1. Does this align with my 12-month vision?
2. Is this the best use of my time vs other opportunities?
3. What would I need to say NO to in order to do this well?
4. Does this build skills, relationships, or credibility I need?

## Weekly Review Questions

Every week, reflect on:
- What moved me closer to my quarterly objectives?
- What held me back or distracted me?
- What needs to change next week?
- Am I focusing on the right priorities?
- Which relationships need attention?

## Monthly Review Questions

Every month, assess:
- Are my quarterly objectives still the right ones?
- What's my velocity toward the 12-month vision?
- What skills gaps are becoming critical?
- Which relationships are bearing fruit?
- What opportunities should I pursue or drop?

## Notes & Reminders

- **Ambition**: Dream 10x, not 10% better
- **Speed**: It's just as hard to dream big as dream small
- **Focus**: Warren Buffett's rule - \"The difference between successful people and really successful people is that really successful people say no to almost everything\"
- **Momentum**: Small wins compound - ship weekly, not monthly
- **Network**: Your network is your net worth - invest in relationships
- **Learning**: Learn from the best people, not just from books

## Context for AI Agent

When processing my backlog and creating tasks:
- Reference these goals to inform priority levels
- Flag tasks that don't align with stated objectives
- Proactively suggest tasks that advance quarterly goals
- Consider skill development opportunities
- Challenge me on low-leverage activities

---

*Review this document monthly. Update as your situation and vision evolve.*
";

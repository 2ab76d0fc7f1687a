//! Response text tables.
//!
//! Kept as ordered data so the dispatcher's selection logic stays generic.
//! Mood templates carry an `{issue}` placeholder.

use crate::triage::{IssueCategory, Mood};

/// Placeholder replaced in mood templates.
pub const ISSUE_PLACEHOLDER: &str = "{issue}";

/// Substituted for the placeholder when no issue was detected.
pub const UNNAMED_ISSUE: &str = "what you're going through";

pub const ISSUE_TEMPLATES: &[(IssueCategory, &[&str])] = &[
    (
        IssueCategory::RelationshipConflict,
        &[
            "Relationships can bring up some of our deepest feelings. It sounds like this one is weighing on you.",
            "Conflict with someone close can hurt in a way that's hard to put into words. I'm glad you're talking about it.",
            "It makes sense to feel shaken when a relationship is going through something painful.",
        ],
    ),
    (
        IssueCategory::WorkStress,
        &[
            "Work pressure can follow you home and make it hard to switch off. That sounds exhausting.",
            "It sounds like work has been asking a lot of you lately. Your limits matter too.",
            "Feeling stretched thin at work is really common, and it's still hard when it's happening to you.",
        ],
    ),
    (
        IssueCategory::FinancialProblems,
        &[
            "Money worries can make everything else feel heavier. It's understandable to feel stressed about this.",
            "Financial strain is stressful, and it says nothing about your worth as a person.",
            "It takes courage to talk about money troubles. Let's look at this one piece at a time.",
        ],
    ),
    (
        IssueCategory::HealthConcerns,
        &[
            "Health worries can be frightening, especially when there's uncertainty involved.",
            "It's natural to feel anxious when your body or your health isn't feeling right.",
            "Dealing with health concerns takes a lot of energy. Be gentle with yourself right now.",
        ],
    ),
    (
        IssueCategory::Loneliness,
        &[
            "Feeling lonely can be really painful. I'm here, and I'm listening.",
            "Loneliness can make the world feel very quiet. Thank you for reaching out.",
            "Wanting connection is deeply human. You're not alone in feeling this way.",
        ],
    ),
    (
        IssueCategory::Grief,
        &[
            "I'm so sorry for your loss. Grief has no timetable, and whatever you're feeling is valid.",
            "Losing someone changes things in ways that are hard to describe. I'm here with you.",
            "Grief is love with nowhere to go. Take all the time you need.",
        ],
    ),
];

pub const MOOD_TEMPLATES: &[(Mood, &[&str])] = &[
    (
        Mood::Angry,
        &[
            "It sounds like {issue} has left you really frustrated. Anger often shows us something matters.",
            "I can hear how angry you are about {issue}. Those feelings are valid.",
        ],
    ),
    (
        Mood::Sad,
        &[
            "I'm sorry you're feeling down about {issue}. It's okay to feel sad.",
            "It sounds like {issue} is weighing heavily on you. I'm here to listen.",
        ],
    ),
    (
        Mood::Anxious,
        &[
            "It sounds like {issue} is making you anxious. Let's slow down and take it one step at a time.",
            "Anxiety about {issue} can feel overwhelming. Try taking a slow, deep breath with me.",
        ],
    ),
    (
        Mood::Lonely,
        &[
            "Feeling lonely with {issue} is hard. I'm glad you reached out.",
            "It sounds like you're carrying {issue} by yourself. You don't have to.",
        ],
    ),
    (
        Mood::Hungry,
        &[
            "It's hard to think clearly about {issue} on an empty stomach. Getting something to eat might help.",
            "Taking care of basic needs matters, especially while dealing with {issue}.",
        ],
    ),
    (
        Mood::Tired,
        &[
            "It sounds like {issue} has left you worn out. Rest is not a luxury.",
            "Exhaustion makes {issue} feel even heavier. Be kind to yourself tonight.",
        ],
    ),
    (
        Mood::Positive,
        &[
            "I'm really glad to hear some positivity, even with {issue} going on.",
            "It's wonderful that you're feeling good. What's been helping with {issue}?",
        ],
    ),
];

pub const NEUTRAL_TEMPLATES: &[&str] = &[
    "Thank you for sharing that with me. I'm here to listen.",
    "I appreciate you opening up. Tell me more about how you're feeling.",
    "That sounds like a lot to hold. I'm here for you.",
];

pub const FOLLOW_UP_QUESTIONS: &[&str] = &[
    "How long have you been feeling this way?",
    "What do you think would help you most right now?",
    "Is there someone in your life you feel comfortable talking to about this?",
    "What has helped you get through difficult times before?",
    "Would you like to talk more about what's on your mind?",
];

pub const CRISIS_LEADS: &[&str] = &[
    "I'm really concerned about what you're sharing, and your safety matters most right now.",
    "It sounds like you're in a lot of pain. You deserve support immediately, and you don't have to face this alone.",
    "Thank you for telling me. What you're feeling is serious, and help is available right now.",
];

/// Fixed emergency block appended to every crisis response.
pub const CRISIS_RESOURCES: &str = "Please reach out to one of these right away:\n\
- 988 Suicide & Crisis Lifeline: call or text 988 (US)\n\
- Crisis Text Line: text HOME to 741741\n\
- Emergency services: call 911 or your local emergency number\n\
- International Association for Suicide Prevention: https://www.iasp.info/resources/Crisis_Centres/";

pub const PROMPT_FOOD: &str = "Would you like some suggestions for comforting places to eat nearby?";
pub const PROMPT_SOCIAL: &str =
    "Would you like some ideas for activities or ways to connect with other people?";
pub const PROMPT_CRISIS: &str =
    "Would you like me to share contact details for people who can support you right now?";
pub const PROMPT_RELATIONSHIP: &str =
    "Would you like some resources on navigating relationship difficulties?";
pub const PROMPT_WORK: &str = "Would you like some resources for managing work stress?";
pub const PROMPT_FINANCIAL: &str =
    "Would you like information about financial support and advice services?";
pub const PROMPT_HEALTH: &str = "Would you like some resources about health and wellbeing support?";
pub const PROMPT_GENERIC: &str = "Would it help if I shared some resources that might support you?";

/// Built-in motivational quotes by category.
pub const QUOTES: &[(&str, &[&str])] = &[
    (
        "motivation",
        &[
            "The secret of getting ahead is getting started.",
            "You don't have to see the whole staircase, just take the first step.",
            "Small steps every day add up to big changes.",
        ],
    ),
    (
        "resilience",
        &[
            "You have been assigned this mountain to show others it can be moved.",
            "Fall seven times, stand up eight.",
            "The oak fought the wind and was broken; the willow bent and survived.",
        ],
    ),
    (
        "self_care",
        &[
            "You can't pour from an empty cup. Take care of yourself first.",
            "Rest when you're weary. Refresh and renew yourself.",
            "Be gentle with yourself. You're doing the best you can.",
        ],
    ),
    (
        "hope",
        &[
            "Even the darkest night will end and the sun will rise.",
            "Tough times never last, but tough people do.",
            "Every day may not be good, but there is something good in every day.",
        ],
    ),
];

/// Templates registered for `issue`, if any.
pub fn issue_templates(issue: IssueCategory) -> Option<&'static [&'static str]> {
    ISSUE_TEMPLATES
        .iter()
        .find(|(c, _)| *c == issue)
        .map(|(_, t)| *t)
}

/// Templates registered for `mood`, if any.
pub fn mood_templates(mood: Mood) -> Option<&'static [&'static str]> {
    MOOD_TEMPLATES
        .iter()
        .find(|(m, _)| *m == mood)
        .map(|(_, t)| *t)
}

/// Quotes for `category` (case-insensitive), if the category is known.
pub fn quotes_for(category: &str) -> Option<&'static [&'static str]> {
    let category = category.trim();
    QUOTES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(category))
        .map(|(_, q)| *q)
}

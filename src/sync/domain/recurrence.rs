//! Translation of Todoist recurrence phrases into Habitica weekly schedules.
//!
//! Only phrases of the form `every <days>` (or plain `daily`) without an
//! anchored start are turned into a daily. Anything else that Todoist still
//! flags as recurring is reported as [`RecurrenceSchedule::Unclassified`] and
//! synced as a plain to-do.

use super::{DueInfo, TaskType};
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::LazyLock;

/// Which weekdays a daily is due on, keyed the way Habitica names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WeeklyMask {
    /// Sunday.
    #[serde(default)]
    pub su: bool,
    /// Monday.
    #[serde(default)]
    pub m: bool,
    /// Tuesday.
    #[serde(default)]
    pub t: bool,
    /// Wednesday.
    #[serde(default)]
    pub w: bool,
    /// Thursday.
    #[serde(default)]
    pub th: bool,
    /// Friday.
    #[serde(default)]
    pub f: bool,
    /// Saturday.
    #[serde(default)]
    pub s: bool,
}

impl WeeklyMask {
    /// Every day of the week.
    pub const EVERY_DAY: Self = Self {
        su: true,
        m: true,
        t: true,
        w: true,
        th: true,
        f: true,
        s: true,
    };

    /// Returns the flags in Sunday..Saturday order.
    #[must_use]
    pub const fn days(self) -> [bool; 7] {
        [self.su, self.m, self.t, self.w, self.th, self.f, self.s]
    }
}

/// Outcome of recurrence classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecurrenceSchedule {
    /// The task does not recur.
    #[default]
    None,
    /// Structured weekly schedule.
    Weekly(WeeklyMask),
    /// Todoist marks the task recurring but the phrase could not be mapped
    /// onto a weekly schedule.
    Unclassified,
}

impl RecurrenceSchedule {
    /// Returns the weekly mask when the schedule is structured.
    #[must_use]
    pub const fn weekly_mask(&self) -> Option<&WeeklyMask> {
        match self {
            Self::Weekly(mask) => Some(mask),
            Self::None | Self::Unclassified => None,
        }
    }

    /// Returns `true` when there is no weekly mask to send.
    #[must_use]
    pub const fn is_unstructured(&self) -> bool {
        self.weekly_mask().is_none()
    }

    /// Returns `true` when the source flagged the task as recurring.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Serialize for RecurrenceSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Weekly(mask) => mask.serialize(serializer),
            Self::None | Self::Unclassified => serializer.serialize_none(),
        }
    }
}

/// Task kind and schedule derived from due metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    /// Habitica task kind.
    pub task_type: TaskType,
    /// Weekly schedule outcome.
    pub schedule: RecurrenceSchedule,
}

impl Recurrence {
    const NON_RECURRING: Self = Self {
        task_type: TaskType::Todo,
        schedule: RecurrenceSchedule::None,
    };

    const UNCLASSIFIED: Self = Self {
        task_type: TaskType::Todo,
        schedule: RecurrenceSchedule::Unclassified,
    };
}

#[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("recurrence pattern must compile")
}

static ANCHORED_START: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"after|starting|last|\d+(st|nd|rd|th)|first|second|third"));
static EVERY_PREFIX: LazyLock<Regex> = LazyLock::new(|| pattern(r"^ev(ery)? \D"));
static EVERY_DAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"^ev(ery)? [^()wek]?(day|night)"));
static EVERY_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"^ev(ery)? (week)?day"));
static EVERY_WEEKEND: LazyLock<Regex> = LazyLock::new(|| pattern(r"^ev(ery)? (week)?end"));
static SUNDAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bs($| |,|u)"));
static MONDAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bm($| |,|o)"));
static TUESDAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bt($| |,|u)"));
static WEDNESDAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bw($| |,|e)"));
static THURSDAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bth($| |,|u)"));
static FRIDAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bf($| |,|r)"));
static SATURDAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bsa($| |,|t)"));

/// Classifies a task's due metadata into a Habitica task kind and schedule.
///
/// A missing due date or a non-recurring one yields a plain to-do. A
/// recurring phrase becomes a daily only when it names no anchored start
/// (`after`, `starting`, `last`, ordinals) and reads `every <word>` or
/// `daily`; otherwise the result is an unclassified recurring to-do.
#[must_use]
pub fn parse_recurrence(due: Option<&DueInfo>) -> Recurrence {
    let Some(recurring_due) = due.filter(|info| info.is_recurring) else {
        return Recurrence::NON_RECURRING;
    };
    let Some(raw_phrase) = recurring_due.string.as_deref() else {
        return Recurrence::UNCLASSIFIED;
    };
    let phrase = raw_phrase.trim().to_lowercase();

    let no_start_date = !ANCHORED_START.is_match(&phrase);
    let need_to_parse = EVERY_PREFIX.is_match(&phrase) || phrase == "daily";
    if !(no_start_date && need_to_parse) {
        return Recurrence::UNCLASSIFIED;
    }

    Recurrence {
        task_type: TaskType::Daily,
        schedule: RecurrenceSchedule::Weekly(weekly_mask(&phrase)),
    }
}

fn weekly_mask(phrase: &str) -> WeeklyMask {
    let everyday = EVERY_DAY.is_match(phrase) || phrase == "daily";
    let weekday = EVERY_WEEKDAY.is_match(phrase);
    let weekend = EVERY_WEEKEND.is_match(phrase);

    WeeklyMask {
        su: everyday || weekend || SUNDAY.is_match(phrase),
        m: everyday || weekday || MONDAY.is_match(phrase),
        t: everyday || weekday || TUESDAY.is_match(phrase),
        w: everyday || weekday || (WEDNESDAY.is_match(phrase) && !weekend),
        th: everyday || weekday || THURSDAY.is_match(phrase),
        f: everyday || weekday || FRIDAY.is_match(phrase),
        s: everyday || weekend || SATURDAY.is_match(phrase),
    }
}

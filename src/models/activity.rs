use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Workout,
    Meal,
    Habit,
    Mindset,
    Sleep,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Workout,
        ActivityType::Meal,
        ActivityType::Habit,
        ActivityType::Mindset,
        ActivityType::Sleep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Workout => "workout",
            ActivityType::Meal => "meal",
            ActivityType::Habit => "habit",
            ActivityType::Mindset => "mindset",
            ActivityType::Sleep => "sleep",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActivityType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "workout" => Ok(ActivityType::Workout),
            "meal" => Ok(ActivityType::Meal),
            "habit" => Ok(ActivityType::Habit),
            "mindset" => Ok(ActivityType::Mindset),
            "sleep" => Ok(ActivityType::Sleep),
            other => Err(format!("unsupported activity type: {other}")),
        }
    }
}

/// One of the five fixed daily scheduling bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    EarlyMorning,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeSlot {
    /// Bands in the order a day is walked.
    pub const ALL: [TimeSlot; 5] = [
        TimeSlot::EarlyMorning,
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::Night,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::EarlyMorning => "early_morning",
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
            TimeSlot::Night => "night",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TimeSlot {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "early_morning" => Ok(TimeSlot::EarlyMorning),
            "morning" => Ok(TimeSlot::Morning),
            "afternoon" => Ok(TimeSlot::Afternoon),
            "evening" => Ok(TimeSlot::Evening),
            "night" => Ok(TimeSlot::Night),
            other => Err(format!("unsupported time slot: {other}")),
        }
    }
}

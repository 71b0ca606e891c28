use std::fmt;

use serde::{Serialize, Serializer};

/// Number of categories the topic model scores.
pub const TOPIC_COUNT: usize = 10;

/// Fixed topic schema. Discriminants are the column positions of the topic
/// model's probability output and must follow the order it was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TopicLabel {
    Business = 0,
    Reminders = 1,
    EventsAndInvitations = 2,
    FinanceAndBills = 3,
    TravelAndBookings = 4,
    CustomerSupport = 5,
    Newsletters = 6,
    Personal = 7,
    JobApplication = 8,
    Promotions = 9,
}

impl TopicLabel {
    pub const ALL: [TopicLabel; TOPIC_COUNT] = [
        TopicLabel::Business,
        TopicLabel::Reminders,
        TopicLabel::EventsAndInvitations,
        TopicLabel::FinanceAndBills,
        TopicLabel::TravelAndBookings,
        TopicLabel::CustomerSupport,
        TopicLabel::Newsletters,
        TopicLabel::Personal,
        TopicLabel::JobApplication,
        TopicLabel::Promotions,
    ];

    #[cfg(test)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TopicLabel::Business => "Business",
            TopicLabel::Reminders => "Reminders",
            TopicLabel::EventsAndInvitations => "Events & Invitations",
            TopicLabel::FinanceAndBills => "Finance & Bills",
            TopicLabel::TravelAndBookings => "Travel & Bookings",
            TopicLabel::CustomerSupport => "Customer Support",
            TopicLabel::Newsletters => "Newsletters",
            TopicLabel::Personal => "Personal",
            TopicLabel::JobApplication => "Job Application",
            TopicLabel::Promotions => "Promotions",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|label| label.as_str()).collect()
    }
}

impl fmt::Display for TopicLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TopicLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Labels assigned to one email, kept in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<TopicLabel>);

impl LabelSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, label: TopicLabel) {
        if let Err(pos) = self.0.binary_search(&label) {
            self.0.insert(pos, label);
        }
    }

    #[cfg(test)]
    pub fn contains(&self, label: TopicLabel) -> bool {
        self.0.binary_search(&label).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = TopicLabel> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<TopicLabel> for LabelSet {
    fn from_iter<I: IntoIterator<Item = TopicLabel>>(iter: I) -> Self {
        let mut set = LabelSet::empty();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

use serde::{Deserialize, Serialize};

/// One slot in a sentence skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotTag {
    SubjectPronoun,
    SubjectNounGroup,
    /// Any verb, transitive verbs used absolutely included.
    Verb,
    /// A transitive verb; always followed somewhere by an object.
    TransitiveVerb,
    ObjectNounGroup,
    Adverbial,
    LocativeComplement,
    Comma,
    QuestionMarker,
    InversionHyphen,
    /// `Est-ce que`.
    InterrogativePrefix,
}

impl SlotTag {
    pub fn is_verb(&self) -> bool {
        matches!(self, Self::Verb | Self::TransitiveVerb)
    }

    pub fn is_subject(&self) -> bool {
        matches!(self, Self::SubjectPronoun | Self::SubjectNounGroup)
    }

    /// Slots that survive the interrogative rewrite after the verb.
    pub fn is_trailing_complement(&self) -> bool {
        matches!(
            self,
            Self::ObjectNounGroup | Self::Adverbial | Self::LocativeComplement
        )
    }
}

/// An ordered template of slot tags defining one sentence shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Skeleton {
    pub slots: Vec<SlotTag>,
}

impl Skeleton {
    pub fn new(slots: &[SlotTag]) -> Self {
        Self {
            slots: slots.to_vec(),
        }
    }

    pub fn contains(&self, tag: SlotTag) -> bool {
        self.slots.contains(&tag)
    }

    /// True if every tag in `required` appears in this skeleton.
    pub fn covers(&self, required: &[SlotTag]) -> bool {
        required.iter().all(|tag| self.contains(*tag))
    }

    pub fn uses_pronoun_subject(&self) -> bool {
        self.contains(SlotTag::SubjectPronoun)
    }

    pub fn is_interrogative(&self) -> bool {
        self.slots.last() == Some(&SlotTag::QuestionMarker)
    }

    /// The verb slot tag, if any.
    pub fn verb_slot(&self) -> Option<SlotTag> {
        self.slots.iter().copied().find(SlotTag::is_verb)
    }
}

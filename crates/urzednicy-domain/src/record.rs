//! Person records as read from the source register

/// One person from the source register
///
/// Every field is optional in the source; date fields keep the raw register
/// text and are normalized only when claims are built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonRecord {
    /// Given names, whitespace separated
    pub name: Option<String>,
    /// Family name
    pub surname: Option<String>,
    /// Place the person is called after ("z Tęczyna")
    pub location: Option<String>,
    /// Coat of arms name
    pub coat_of_arms: Option<String>,
    /// Raw date of birth
    pub date_of_birth: Option<String>,
    /// Raw date of death
    pub date_of_death: Option<String>,
    /// Raw floruit
    pub floruit: Option<String>,
    /// Place of birth with its gazetteer id
    pub place_of_birth: Option<BirthPlace>,
    /// Name forms attested in sources
    pub stated_as: Vec<StatedAs>,
    /// Offices held
    pub positions: Vec<PositionRecord>,
}

impl PersonRecord {
    /// Individual given names
    pub fn given_names(&self) -> impl Iterator<Item = &str> {
        self.name.as_deref().unwrap_or_default().split_whitespace()
    }
}

/// Place of birth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthPlace {
    /// Place name
    pub place: String,
    /// PRNG gazetteer identifier
    pub prng: String,
}

/// A name form in a given language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatedAs {
    /// The attested text
    pub text: String,
    /// Language code
    pub language: String,
}

/// An office held by the person
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionRecord {
    /// Office name
    pub office: String,
    /// Raw start date
    pub start_date: Option<String>,
    /// Raw end date
    pub end_date: Option<String>,
    /// Raw single date, when no range is known
    pub date: Option<String>,
}

impl PositionRecord {
    /// Create a position with no dates
    pub fn new(office: impl Into<String>) -> Self {
        Self {
            office: office.into(),
            ..Self::default()
        }
    }
}

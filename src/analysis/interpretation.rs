use std::fmt::Display;

/// Presentation bands for a colocation quotient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpretation {
    Strong,
    Moderate,
    Weak,
}

impl Interpretation {
    pub fn from_quotient(quotient: f64) -> Self {
        if quotient > 1.2 {
            Interpretation::Strong
        } else if quotient > 0.8 {
            Interpretation::Moderate
        } else {
            Interpretation::Weak
        }
    }
}

impl Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpretation::Strong => write!(
                f,
                "Strong positive colocation (healthcare facilities tend to be near population centers)"
            ),
            Interpretation::Moderate => write!(f, "Moderate colocation (some spatial association)"),
            Interpretation::Weak => write!(f, "Weak or negative colocation (little spatial association)"),
        }
    }
}

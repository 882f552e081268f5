//! Phase vocabulary and extraction.
//!
//! Doppler-style items carry a phase label that prices very differently from
//! the base item. Providers bury rare phases under the cheaper numbered ones
//! when searched by name alone, so the phase must be stripped from the search
//! term and carried as an explicit filter.

use std::fmt;

/// Known phase labels, in the order they are scanned for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Phase1,
    Phase2,
    Phase3,
    Phase4,
    Ruby,
    Sapphire,
    BlackPearl,
    Emerald,
}

impl Phase {
    /// Every phase in scan order.
    pub const ALL: [Phase; 8] = [
        Phase::Phase1,
        Phase::Phase2,
        Phase::Phase3,
        Phase::Phase4,
        Phase::Ruby,
        Phase::Sapphire,
        Phase::BlackPearl,
        Phase::Emerald,
    ];

    /// Canonical label as it appears in market names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Phase1 => "Phase 1",
            Phase::Phase2 => "Phase 2",
            Phase::Phase3 => "Phase 3",
            Phase::Phase4 => "Phase 4",
            Phase::Ruby => "Ruby",
            Phase::Sapphire => "Sapphire",
            Phase::BlackPearl => "Black Pearl",
            Phase::Emerald => "Emerald",
        }
    }

    /// Case-insensitive match against a provider-reported phase label.
    pub fn matches(&self, label: &str) -> bool {
        label.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan `term` for a known phase token, case-insensitively.
///
/// Returns the term with the token removed (whitespace collapsed) and the
/// detected phase. A term without a phase token is returned unchanged.
pub fn extract_phase(term: &str) -> (String, Option<Phase>) {
    let lowered = term.to_lowercase();

    for phase in Phase::ALL {
        let token = phase.as_str().to_lowercase();
        if let Some(pos) = lowered.find(&token) {
            let mut stripped = String::with_capacity(term.len());
            stripped.push_str(&term[..pos]);
            stripped.push_str(&term[pos + token.len()..]);
            let stripped = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
            return (stripped, Some(phase));
        }
    }

    (term.to_string(), None)
}

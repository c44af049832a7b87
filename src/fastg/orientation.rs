#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Represents edge orientation/strand
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum Orientation {
    Forward,
    Backward,
}

impl Orientation {
    /// Parse an orientation from a strand character, where + is
    /// Forward, - is Backward
    #[inline]
    pub fn from_plus_minus(c: char) -> Option<Self> {
        match c {
            '+' => Some(Orientation::Forward),
            '-' => Some(Orientation::Backward),
            _ => None,
        }
    }

    /// Build an orientation from the .fastg reverse-complement marker,
    /// a trailing `'` on a descriptor
    #[inline]
    pub fn from_rc_marker(rc: bool) -> Self {
        if rc {
            Orientation::Backward
        } else {
            Orientation::Forward
        }
    }

    #[inline]
    pub fn strand_char(&self) -> char {
        match self {
            Self::Forward => '+',
            Self::Backward => '-',
        }
    }

    /// The descriptor suffix this orientation is written as: `'` for
    /// Backward, nothing for Forward
    #[inline]
    pub fn rc_marker(&self) -> &'static str {
        match self {
            Self::Forward => "",
            Self::Backward => "'",
        }
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        !bool::from(*self)
    }
}

/// Default orientation is forward
impl Default for Orientation {
    #[inline]
    fn default() -> Orientation {
        Orientation::Forward
    }
}

/// Forward is true, backward is false
impl From<Orientation> for bool {
    #[inline]
    fn from(o: Orientation) -> bool {
        match o {
            Orientation::Forward => true,
            Orientation::Backward => false,
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = &'static str;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Orientation::from_plus_minus(c)
                .ok_or("Could not parse orientation (was not + or -)"),
            _ => Err("Could not parse orientation (was not + or -)"),
        }
    }
}

/// Display uses the strand suffix convention, mapping `Forward` to
/// "+", `Backward` to "-".
///
/// # Examples
///
/// ```
/// use fastg::fastg::Orientation as O;
///
/// assert_eq!(&format!("{}", O::Forward), "+");
/// assert_eq!(&format!("{}", O::Backward), "-");
/// ```
impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.strand_char())
    }
}

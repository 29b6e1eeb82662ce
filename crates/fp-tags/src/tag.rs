use std::fmt;

/// Source span as a byte range.
pub type Span = std::ops::Range<usize>;

/// The command word of a tag (`$<command>/...$`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Guard satisfied when a flag or item exists.
    If,
    /// Guard that is always satisfied.
    Default,
    /// State mutation.
    Set,
    /// Side effect: an item was acquired.
    Acquire,
    /// Side effect: the candidate key that answered the player.
    Keyword,
    /// Side effect: the game is won.
    Win,
    /// Any other command word, including the empty one.
    Other(String),
}

impl Command {
    /// Map a command word to its command.
    pub fn parse(word: &str) -> Self {
        match word {
            "if" => Self::If,
            "default" => Self::Default,
            "set" => Self::Set,
            "acquire" => Self::Acquire,
            "keyword" => Self::Keyword,
            "win" => Self::Win,
            other => Self::Other(other.to_string()),
        }
    }

    /// The command word as authored.
    pub fn as_str(&self) -> &str {
        match self {
            Self::If => "if",
            Self::Default => "default",
            Self::Set => "set",
            Self::Acquire => "acquire",
            Self::Keyword => "keyword",
            Self::Win => "win",
            Self::Other(word) => word,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `/`-separated segments after the command.
///
/// Each segment is only present if the one before it is, so the variants
/// are the four legal prefixes of `thing/key/arg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagPath {
    /// `$cmd$`
    Bare,
    /// `$cmd/thing$`
    Thing(String),
    /// `$cmd/thing/key$`
    Key(String, String),
    /// `$cmd/thing/key/arg$`
    Arg(String, String, String),
}

/// A decoded inline tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The command word.
    pub command: Command,
    /// The optional segments.
    pub path: TagPath,
}

impl Tag {
    /// Build a tag from its already-split segments.
    pub fn new(command: Command, thing: Option<&str>, key: Option<&str>, arg: Option<&str>) -> Self {
        let path = match (thing, key, arg) {
            (Some(t), Some(k), Some(a)) => TagPath::Arg(t.into(), k.into(), a.into()),
            (Some(t), Some(k), None) => TagPath::Key(t.into(), k.into()),
            (Some(t), None, _) => TagPath::Thing(t.into()),
            (None, _, _) => TagPath::Bare,
        };
        Self { command, path }
    }

    /// Decode the inner text of a tag, without the `$` delimiters.
    ///
    /// The thing and key segments never contain `/`, so at most four pieces
    /// are split off and the arg keeps any slashes of its own.
    pub fn decode(inner: &str) -> Self {
        let mut parts = inner.splitn(4, '/');
        let command = Command::parse(parts.next().unwrap_or_default());
        let thing = parts.next();
        let key = parts.next();
        let arg = parts.next();
        Self::new(command, thing, key, arg)
    }

    /// The thing segment.
    pub fn thing(&self) -> Option<&str> {
        match &self.path {
            TagPath::Bare => None,
            TagPath::Thing(t) | TagPath::Key(t, _) | TagPath::Arg(t, _, _) => Some(t),
        }
    }

    /// The key segment.
    pub fn key(&self) -> Option<&str> {
        match &self.path {
            TagPath::Key(_, k) | TagPath::Arg(_, k, _) => Some(k),
            _ => None,
        }
    }

    /// The arg segment.
    pub fn arg(&self) -> Option<&str> {
        match &self.path {
            TagPath::Arg(_, _, a) => Some(a),
            _ => None,
        }
    }

    /// The thing segment as a target kind.
    pub fn target(&self) -> Option<Target> {
        self.thing().map(Target::parse)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.command)?;
        match &self.path {
            TagPath::Bare => {}
            TagPath::Thing(t) => write!(f, "/{t}")?,
            TagPath::Key(t, k) => write!(f, "/{t}/{k}")?,
            TagPath::Arg(t, k, a) => write!(f, "/{t}/{k}/{a}")?,
        }
        f.write_str("$")
    }
}

/// What the thing segment of a tag refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `_me`: the character whose dialogue is being evaluated.
    Me,
    /// `_inventory`: the player's items.
    Inventory,
    /// `_world`: world flags.
    World,
    /// A named character's flags.
    Character(String),
    /// Any other name with the reserved `_` prefix, or an empty name.
    Reserved(String),
}

impl Target {
    /// Classify a thing segment.
    pub fn parse(thing: &str) -> Self {
        match thing {
            "_me" => Self::Me,
            "_inventory" => Self::Inventory,
            "_world" => Self::World,
            t if t.is_empty() || t.starts_with('_') => Self::Reserved(t.to_string()),
            t => Self::Character(t.to_string()),
        }
    }

    /// Replace `_me` with the speaking character.
    pub fn resolve_me(self, name: &str) -> Self {
        match self {
            Self::Me => Self::Character(name.to_string()),
            other => other,
        }
    }
}

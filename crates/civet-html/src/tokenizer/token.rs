use std::fmt;

/// An attribute on a start tag.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the
/// following tokens: DOCTYPE, start tag, end tag, comment, character,
/// end-of-file."
///
/// Tokens double as mutable accumulators while the state machine builds
/// them; emission freezes them into the output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Doctype declaration. The name is ASCII-lowercased; everything after
    /// the name up to the closing `>` lands verbatim in `data` (public and
    /// system identifiers are not parsed apart).
    Doctype {
        name: String,
        data: Option<String>,
        force_quirks: bool,
    },

    /// Start tag. `current_attr_name` / `current_attr_value` accumulate the
    /// attribute under construction; [`Token::commit_pending_attribute`]
    /// moves it into `attributes`.
    StartTag {
        name: String,
        self_closing: bool,
        /// Attributes in source order. Duplicates are kept.
        attributes: Vec<Attribute>,
        current_attr_name: String,
        current_attr_value: String,
    },

    /// End tag. Attributes on end tags are tokenized but discarded.
    EndTag { name: String },

    /// Comment data.
    Comment { data: String },

    /// A single codepoint of character data.
    Character { data: char },

    /// End of input.
    EndOfFile,
}

impl Token {
    /// New doctype token with empty name and no tail data.
    #[must_use]
    pub const fn new_doctype() -> Self {
        Self::Doctype {
            name: String::new(),
            data: None,
            force_quirks: false,
        }
    }

    /// "When a start or end tag token is created, its self-closing flag must
    /// be unset ... and its attributes list must be empty."
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
            current_attr_name: String::new(),
            current_attr_value: String::new(),
        }
    }

    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
        }
    }

    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment {
            data: String::new(),
        }
    }

    /// New comment token seeded with initial data (used for `<![CDATA[`).
    #[must_use]
    pub const fn new_comment_with(data: String) -> Self {
        Self::Comment { data }
    }

    #[must_use]
    pub const fn new_character(c: char) -> Self {
        Self::Character { data: c }
    }

    #[must_use]
    pub const fn new_eof() -> Self {
        Self::EndOfFile
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    #[must_use]
    pub const fn is_start_tag(&self) -> bool {
        matches!(self, Self::StartTag { .. })
    }

    // The mutators below panic when called on the wrong variant: that is a
    // bug in the state machine, not in the input.

    /// Append to the current tag token's tag name.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn append_to_tag_name(&mut self, c: char) {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => name.push(c),
            _ => panic!("append_to_tag_name called on non-tag token"),
        }
    }

    /// Append to the current doctype token's name.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-doctype token.
    pub fn append_to_doctype_name(&mut self, c: char) {
        match self {
            Self::Doctype { name, .. } => name.push(c),
            _ => panic!("append_to_doctype_name called on non-doctype token"),
        }
    }

    /// Append to the current doctype token's verbatim tail data.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-doctype token.
    pub fn append_to_doctype_data(&mut self, c: char) {
        match self {
            Self::Doctype { data, .. } => data.get_or_insert_with(String::new).push(c),
            _ => panic!("append_to_doctype_data called on non-doctype token"),
        }
    }

    /// Whether the doctype token has started accumulating tail data.
    #[must_use]
    pub const fn doctype_has_data(&self) -> bool {
        matches!(self, Self::Doctype { data: Some(_), .. })
    }

    /// Set the doctype token's force-quirks flag.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-doctype token.
    pub fn set_force_quirks(&mut self) {
        match self {
            Self::Doctype { force_quirks, .. } => *force_quirks = true,
            _ => panic!("set_force_quirks called on non-doctype token"),
        }
    }

    /// Set the self-closing flag. On an end tag the flag has nowhere to go
    /// and is dropped.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn set_self_closing(&mut self) {
        match self {
            Self::StartTag { self_closing, .. } => *self_closing = true,
            Self::EndTag { .. } => {}
            _ => panic!("set_self_closing called on non-tag token"),
        }
    }

    /// Append to the comment token's data.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-comment token.
    pub fn append_to_comment(&mut self, c: char) {
        match self {
            Self::Comment { data } => data.push(c),
            _ => panic!("append_to_comment called on non-comment token"),
        }
    }

    /// Commit the attribute under construction, then start a fresh one.
    ///
    /// Called when a state begins a new attribute. On an end tag this is a
    /// no-op (end tags carry no attributes).
    pub fn begin_attribute(&mut self) {
        self.commit_pending_attribute();
    }

    /// Move the accumulated attribute into the attribute list if it has a
    /// name, then clear both accumulators.
    ///
    /// Called at every new-attribute boundary and at tag emission. The list
    /// preserves source order and keeps duplicates.
    pub fn commit_pending_attribute(&mut self) {
        if let Self::StartTag {
            attributes,
            current_attr_name,
            current_attr_value,
            ..
        } = self
        {
            if !current_attr_name.is_empty() {
                attributes.push(Attribute::new(
                    std::mem::take(current_attr_name),
                    std::mem::take(current_attr_value),
                ));
            } else {
                current_attr_value.clear();
            }
        }
    }

    /// Append to the name of the attribute under construction. Discarded on
    /// end tags.
    pub fn append_to_current_attribute_name(&mut self, c: char) {
        if let Self::StartTag {
            current_attr_name, ..
        } = self
        {
            current_attr_name.push(c);
        }
    }

    /// Append to the value of the attribute under construction. Discarded
    /// on end tags.
    pub fn append_to_current_attribute_value(&mut self, c: char) {
        if let Self::StartTag {
            current_attr_value, ..
        } = self
        {
            current_attr_value.push(c);
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                data,
                force_quirks,
            } => {
                write!(f, "DOCTYPE {name}")?;
                if let Some(data) = data {
                    write!(f, " {data}")?;
                }
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
                ..
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => match data {
                '\n' => write!(f, "Character(\\n)"),
                '\t' => write!(f, "Character(\\t)"),
                ' ' => write!(f, "Character(SPACE)"),
                c => write!(f, "Character({c})"),
            },
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}

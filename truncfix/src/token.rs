//! Token sequences that truncations are resolved in.

use udgraph::graph::Sentence;

/// A sequence of tagged tokens.
///
/// Tokens are addressed by their position, starting at zero. Resolution
/// only ever rewrites lemmas, so a sequence is never resized.
#[allow(clippy::len_without_is_empty)]
pub trait TokenSequence {
    fn token(&self, idx: usize) -> &dyn Token;

    fn token_mut(&mut self, idx: usize) -> &mut dyn TokenMut;

    fn len(&self) -> usize;
}

pub trait Token {
    fn form(&self) -> &str;
    fn lemma(&self) -> &str;
    fn xpos(&self) -> &str;
}

pub trait TokenMut: Token {
    fn set_lemma(&mut self, lemma: String);
}

/// A plain token with a form, a part-of-speech tag, and a lemma.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaggedToken {
    form: String,
    xpos: String,
    lemma: String,
}

impl TaggedToken {
    pub fn new(form: impl Into<String>, xpos: impl Into<String>, lemma: impl Into<String>) -> Self {
        TaggedToken {
            form: form.into(),
            xpos: xpos.into(),
            lemma: lemma.into(),
        }
    }
}

impl Token for TaggedToken {
    fn form(&self) -> &str {
        &self.form
    }

    fn lemma(&self) -> &str {
        &self.lemma
    }

    fn xpos(&self) -> &str {
        &self.xpos
    }
}

impl TokenMut for TaggedToken {
    fn set_lemma(&mut self, lemma: String) {
        self.lemma = lemma;
    }
}

impl TokenSequence for Vec<TaggedToken> {
    fn token(&self, idx: usize) -> &dyn Token {
        &self[idx]
    }

    fn token_mut(&mut self, idx: usize) -> &mut dyn TokenMut {
        &mut self[idx]
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// CoNLL-U sentences, skipping the artificial root node.
impl TokenSequence for Sentence {
    fn token(&self, idx: usize) -> &dyn Token {
        self[idx + 1]
            .token()
            .expect("The root node was used as a token")
    }

    fn token_mut(&mut self, idx: usize) -> &mut dyn TokenMut {
        self[idx + 1]
            .token_mut()
            .expect("The root node was used as a token")
    }

    fn len(&self) -> usize {
        Sentence::len(self) - 1
    }
}

impl Token for udgraph::token::Token {
    fn form(&self) -> &str {
        self.form()
    }

    fn lemma(&self) -> &str {
        self.lemma().unwrap_or("_")
    }

    fn xpos(&self) -> &str {
        self.xpos().unwrap_or("_")
    }
}

impl TokenMut for udgraph::token::Token {
    fn set_lemma(&mut self, lemma: String) {
        self.set_lemma(Some(lemma));
    }
}

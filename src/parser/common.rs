use pest::Parser as PestParser;
use pest::error::ErrorVariant;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "parser/output_grammar.pest"] // Path relative to src
pub struct OutputParser;

pub type Error = Box<pest::error::Error<Rule>>;

pub fn unwrap_single_pair(pair: pest::iterators::Pair<Rule>) -> pest::iterators::Pair<Rule> {
    let mut pairs = pair.into_inner();
    let pair = pairs.next().unwrap();
    assert_eq!(pairs.next(), None);
    pair
}

// A trait for converting a pest::iterators::Pair<Rule> into a Rust type. This
// is used to convert from the uniformly structured nesting
// pest::iterators::Pair<Rule> into the target tree.
pub trait ParsePair: Sized {
    // The rule that this type is parsed from.
    fn rule() -> Rule;

    // Parse a single instance of this type from a pest::iterators::Pair<Rule>.
    // The input must match the rule returned by `rule`; otherwise, a panic is
    // expected.
    fn parse_pair(pair: pest::iterators::Pair<Rule>) -> Self;

    // The rule must match the whole input; trailing text is an error.
    fn parse_str(s: &str) -> Result<Self, Error> {
        let mut pairs = OutputParser::parse(Self::rule(), s)?;
        let pair = pairs.next().unwrap();
        assert_eq!(pairs.next(), None);
        let end = pair.as_span().end_pos();
        if end.pos() != s.len() {
            return Err(Box::new(pest::error::Error::new_from_pos(
                ErrorVariant::CustomError {
                    message: format!("unexpected input after {:?}", Self::rule()),
                },
                end,
            )));
        }
        Ok(Self::parse_pair(pair))
    }
}

/// A trait for types that can be directly parsed from a string input,
/// regardless of context.
pub trait Parse {
    fn parse(input: &str) -> Result<Self, Error>
    where
        Self: Sized;
}

impl<T: ParsePair> Parse for T {
    fn parse(input: &str) -> Result<Self, Error> {
        T::parse_str(input)
    }
}

pub struct RuleIter<'a> {
    iter: pest::iterators::Pairs<'a, Rule>,
    // Set to true when done is called, so destructor doesn't panic
    done: bool,
}

impl<'a> From<pest::iterators::Pairs<'a, Rule>> for RuleIter<'a> {
    fn from(iter: pest::iterators::Pairs<'a, Rule>) -> Self {
        RuleIter { iter, done: false }
    }
}

impl<'a> RuleIter<'a> {
    pub fn peek(&self) -> Option<pest::iterators::Pair<'a, Rule>> {
        self.iter.peek()
    }

    // Pop the next pair if it matches the rule. Returns None if not.
    pub fn pop_if(&mut self, rule: Rule) -> Option<pest::iterators::Pair<'a, Rule>> {
        match self.peek() {
            Some(pair) if pair.as_rule() == rule => {
                self.iter.next();
                Some(pair)
            }
            _ => None,
        }
    }

    // Parse the next pair if it matches the rule. Returns None if not.
    pub fn parse_if_next<T: ParsePair>(&mut self) -> Option<T> {
        match self.peek() {
            Some(pair) if pair.as_rule() == T::rule() => {
                self.iter.next();
                Some(T::parse_pair(pair))
            }
            _ => None,
        }
    }

    // Parse the next pair, assuming it matches the rule. Panics if not.
    pub fn parse_next<T: ParsePair>(&mut self) -> T {
        let pair = self.iter.next().unwrap();
        T::parse_pair(pair)
    }

    pub fn done(mut self) {
        self.done = true;
        assert_eq!(self.iter.next(), None);
    }
}

/// Make sure that the iterator was completely consumed when the iterator is
/// dropped - that we didn't leave any partially-parsed tokens.
impl Drop for RuleIter<'_> {
    fn drop(&mut self) {
        if self.done || std::thread::panicking() {
            return;
        }
        assert_eq!(self.iter.next(), None);
    }
}

use std::fmt;
use std::sync::Arc;

/// What to do with the text matched by one rule.
pub enum Handler<V = String> {
    /// Consume the text without storing it.
    Ignore,
    /// Store the text as-is.
    Literal,
    /// Store the output of the function, called on the text.
    Transform(Arc<dyn Fn(&str) -> V + Send + Sync>),
}

impl<V> Handler<V> {
    pub fn transform(func: impl Fn(&str) -> V + Send + Sync + 'static) -> Handler<V> {
        Handler::Transform(Arc::new(func))
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Handler::Ignore)
    }
}

impl<V> Clone for Handler<V> {
    fn clone(&self) -> Handler<V> {
        match self {
            Handler::Ignore => Handler::Ignore,
            Handler::Literal => Handler::Literal,
            Handler::Transform(func) => Handler::Transform(func.clone()),
        }
    }
}

impl<V> fmt::Debug for Handler<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<V> fmt::Display for Handler<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Handler::Ignore => write!(f, "Ignore"),
            Handler::Literal => write!(f, "Literal"),
            Handler::Transform(_) => write!(f, "Transform"),
        }
    }
}

/// One row of a parse map: an identifier, the regex fragment it consumes, and what to do with
/// the matched text.
#[derive(Debug, Clone)]
pub struct Rule<V = String> {
    identifier: String,
    fragment: String,
    handler: Handler<V>,
}

impl<V> Rule<V> {
    pub fn new(identifier: &str, fragment: &str, handler: Handler<V>) -> Rule<V> {
        Rule {
            identifier: identifier.to_owned(),
            fragment: fragment.to_owned(),
            handler,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The regex fragment, exactly as written. It is not anchored.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn handler(&self) -> &Handler<V> {
        &self.handler
    }
}

impl<V> fmt::Display for Rule<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} /{}/ {}",
            self.identifier,
            self.fragment.escape_default(),
            self.handler
        )
    }
}

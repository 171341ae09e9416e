//! Password rules
//!
//! Each rule is an independent predicate. The engine evaluates every rule for
//! every input and reports the ones that fail, in declaration order.

mod charset;
mod length;

pub use charset::{has_digit, has_lowercase, has_no_whitespace, has_uppercase};
pub use length::{meets_min_length, within_max_length};

/// A single named password requirement.
#[derive(Debug, Clone, Copy)]
pub struct PasswordRule {
    pub id: &'static str,
    pub description: &'static str,
    pub predicate: fn(&str) -> bool,
}

impl PasswordRule {
    /// Returns `true` if the password satisfies this rule.
    pub fn is_met(&self, password: &str) -> bool {
        (self.predicate)(password)
    }
}

/// The signup password policy, in display order.
pub static PASSWORD_RULES: [PasswordRule; 6] = [
    PasswordRule {
        id: "min-length",
        description: "At least 10 characters",
        predicate: meets_min_length,
    },
    PasswordRule {
        id: "max-length",
        description: "At most 24 characters",
        predicate: within_max_length,
    },
    PasswordRule {
        id: "no-whitespace",
        description: "No spaces or other whitespace",
        predicate: has_no_whitespace,
    },
    PasswordRule {
        id: "digit",
        description: "At least one number",
        predicate: has_digit,
    },
    PasswordRule {
        id: "uppercase",
        description: "At least one uppercase letter",
        predicate: has_uppercase,
    },
    PasswordRule {
        id: "lowercase",
        description: "At least one lowercase letter",
        predicate: has_lowercase,
    },
];

/// Outcome of evaluating a password against a rule table.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub unmet_rules: Vec<&'static PasswordRule>,
    pub is_valid: bool,
}

impl ValidationResult {
    /// Descriptions of the unmet rules, in declaration order.
    pub fn descriptions(&self) -> Vec<&'static str> {
        self.unmet_rules.iter().map(|rule| rule.description).collect()
    }
}

/// Evaluates passwords against a fixed rule table.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine {
    rules: &'static [PasswordRule],
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(&PASSWORD_RULES)
    }
}

impl RuleEngine {
    pub fn new(rules: &'static [PasswordRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [PasswordRule] {
        self.rules
    }

    /// Returns the rules the password does not satisfy.
    ///
    /// An empty password fails every rule, so the full list of requirements
    /// is shown before anything is typed.
    pub fn unmet_rules(&self, password: &str) -> Vec<&'static PasswordRule> {
        if password.is_empty() {
            return self.rules.iter().collect();
        }
        self.rules
            .iter()
            .filter(|rule| !rule.is_met(password))
            .collect()
    }

    /// Returns the descriptions of the unmet rules, in declaration order.
    pub fn evaluate(&self, password: &str) -> Vec<&'static str> {
        self.unmet_rules(password)
            .into_iter()
            .map(|rule| rule.description)
            .collect()
    }

    pub fn validate(&self, password: &str) -> ValidationResult {
        let unmet_rules = self.unmet_rules(password);
        let is_valid = unmet_rules.is_empty() && !password.is_empty();
        ValidationResult {
            unmet_rules,
            is_valid,
        }
    }

    pub fn is_valid(&self, password: &str) -> bool {
        self.validate(password).is_valid
    }
}

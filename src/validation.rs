// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use rust_decimal::Decimal;

use crate::models::{Account, AccountRequest};
use crate::utils::fmt_brl;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 255;

/// Accounts eligible for transfers: the active subset of a directory
/// snapshot. Never refreshed after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferPool {
    accounts: Vec<Account>,
}

impl TransferPool {
    pub fn from_accounts(accounts: &[Account]) -> Self {
        Self {
            accounts: accounts.iter().filter(|a| a.active).cloned().collect(),
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn find(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    From,
    To,
    Amount,
    Name,
    Description,
    Balance,
    /// Cross-field rules.
    Form,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    UnknownAccount { id: i64 },
    SameAccount,
    InvalidAmount,
    InsufficientBalance { available: Decimal, requested: Decimal },
    TooLong { max: usize },
    Negative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: Field,
    pub rule: Rule,
}

impl Violation {
    fn new(field: Field, rule: Rule) -> Self {
        Self { field, rule }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::From => "from",
            Field::To => "to",
            Field::Amount => "amount",
            Field::Name => "name",
            Field::Description => "description",
            Field::Balance => "balance",
            Field::Form => "form",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule {
            Rule::Required => write!(f, "{}: this field is required", self.field),
            Rule::UnknownAccount { id } => {
                write!(f, "{}: no active beneficio with id {}", self.field, id)
            }
            Rule::SameAccount => f.write_str("source and destination must be different"),
            Rule::InvalidAmount => write!(f, "{}: must be greater than zero", self.field),
            Rule::InsufficientBalance {
                available,
                requested,
            } => write!(
                f,
                "{}: insufficient balance ({} requested, {} available)",
                self.field,
                fmt_brl(requested),
                fmt_brl(available)
            ),
            Rule::TooLong { max } => write!(f, "{}: at most {} characters", self.field, max),
            Rule::Negative => write!(f, "{}: must be zero or greater", self.field),
        }
    }
}

/// A transfer that passed every client-side rule, with the resolved
/// account snapshots for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTransfer {
    pub from: Account,
    pub to: Account,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid(ValidTransfer),
    /// Never empty.
    Invalid(Vec<Violation>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Valid(_) => &[],
            ValidationResult::Invalid(v) => v,
        }
    }

    pub fn violates(&self, pred: impl Fn(&Rule) -> bool) -> bool {
        self.violations().iter().any(|v| pred(&v.rule))
    }

    /// Violations for one field, for inline display.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &Violation> {
        self.violations().iter().filter(move |v| v.field == field)
    }
}

/// Checks a candidate transfer against the active pool.
///
/// Pure: the same inputs always give the same result. The balance rule is
/// only evaluated once the source resolves and the amount is positive; the
/// backend repeats every check.
pub fn validate_transfer(
    pool: &TransferPool,
    from_id: Option<i64>,
    to_id: Option<i64>,
    amount: Option<Decimal>,
) -> ValidationResult {
    let mut violations = Vec::new();

    let from = resolve(pool, Field::From, from_id, &mut violations);
    let to = resolve(pool, Field::To, to_id, &mut violations);

    if let (Some(f), Some(t)) = (from_id, to_id) {
        if f == t {
            violations.push(Violation::new(Field::Form, Rule::SameAccount));
        }
    }

    let amount = match amount {
        None => {
            violations.push(Violation::new(Field::Amount, Rule::Required));
            None
        }
        Some(a) if a <= Decimal::ZERO => {
            violations.push(Violation::new(Field::Amount, Rule::InvalidAmount));
            None
        }
        Some(a) => Some(a),
    };

    if let (Some(src), Some(a)) = (from, amount) {
        if a > src.balance {
            violations.push(Violation::new(
                Field::Amount,
                Rule::InsufficientBalance {
                    available: src.balance,
                    requested: a,
                },
            ));
        }
    }

    match (from, to, amount) {
        (Some(from), Some(to), Some(amount)) if violations.is_empty() => {
            ValidationResult::Valid(ValidTransfer {
                from: from.clone(),
                to: to.clone(),
                amount,
            })
        }
        _ => ValidationResult::Invalid(violations),
    }
}

fn resolve<'a>(
    pool: &'a TransferPool,
    field: Field,
    id: Option<i64>,
    violations: &mut Vec<Violation>,
) -> Option<&'a Account> {
    let Some(id) = id else {
        violations.push(Violation::new(field, Rule::Required));
        return None;
    };
    let found = pool.find(id);
    if found.is_none() {
        violations.push(Violation::new(field, Rule::UnknownAccount { id }));
    }
    found
}

/// Validates the create/edit form and builds the request body.
///
/// Name and description are trimmed; an empty description is sent as absent.
pub fn validate_account_form(
    name: &str,
    description: Option<&str>,
    balance: Option<Decimal>,
    active: Option<bool>,
) -> Result<AccountRequest, Vec<Violation>> {
    let mut violations = Vec::new();

    let name = name.trim();
    if name.is_empty() {
        violations.push(Violation::new(Field::Name, Rule::Required));
    } else if name.chars().count() > NAME_MAX_CHARS {
        violations.push(Violation::new(
            Field::Name,
            Rule::TooLong {
                max: NAME_MAX_CHARS,
            },
        ));
    }

    let description = description.map(str::trim).filter(|d| !d.is_empty());
    if description.is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_CHARS) {
        violations.push(Violation::new(
            Field::Description,
            Rule::TooLong {
                max: DESCRIPTION_MAX_CHARS,
            },
        ));
    }

    match balance {
        None => violations.push(Violation::new(Field::Balance, Rule::Required)),
        Some(b) if b < Decimal::ZERO => {
            violations.push(Violation::new(Field::Balance, Rule::Negative))
        }
        Some(_) => {}
    }

    match balance {
        Some(balance) if violations.is_empty() => Ok(AccountRequest {
            name: name.to_string(),
            description: description.map(str::to_string),
            balance,
            active,
        }),
        _ => Err(violations),
    }
}

//! Issues found while checking a cart, and the report that collects them.

use domain::Money;
use serde::{Deserialize, Serialize};

/// A single reason a checkout attempt cannot proceed.
///
/// `Display` renders the message shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckoutIssue {
    /// The item is no longer listed in the catalog.
    ItemUnavailable { name: String },

    /// The catalog price differs from the price captured in the cart.
    PriceChanged { name: String, old: Money, new: Money },

    /// The stale item could not be removed from the cart.
    RemovalFailed { name: String },

    /// The stale item was removed but could not be added back.
    UpdateFailed { name: String },

    /// The cart now holds the catalog price; the shopper must review it.
    PriceCorrected { name: String, old: Money, new: Money },

    /// A collaborator refused the request with its own message.
    Rejected { message: String },
}

impl std::fmt::Display for CheckoutIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutIssue::ItemUnavailable { name } => write!(
                f,
                "O item {name} não está mais disponível no catálogo, \
                 o remova do carrinho para prosseguir com a compra"
            ),
            CheckoutIssue::PriceChanged { name, old, new } => write!(
                f,
                "O produto {name} mudou de valor (de: {} para: {}) \
                 desde que foi adicionado ao carrinho.",
                old.to_brl(),
                new.to_brl()
            ),
            CheckoutIssue::RemovalFailed { name } => write!(
                f,
                "Não foi possível remover automaticamente o produto {name} do seu carrinho, \
                 remova e adicione novamente caso ainda deseje comprar este item"
            ),
            CheckoutIssue::UpdateFailed { name } => write!(
                f,
                "Não foi possível atualizar automaticamente o produto {name} do seu carrinho, \
                 adicione novamente caso ainda deseje comprar este item"
            ),
            CheckoutIssue::PriceCorrected { name, old, new } => {
                let changed = CheckoutIssue::PriceChanged {
                    name: name.clone(),
                    old: *old,
                    new: *new,
                };
                write!(
                    f,
                    "{changed} Atualizamos o valor em seu carrinho, \
                     realize a conferência do pedido e se preferir remova o produto"
                )
            }
            CheckoutIssue::Rejected { message } => f.write_str(message),
        }
    }
}

/// Ordered issues collected during one checkout attempt.
///
/// A non-empty report means the attempt produced no order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorReport {
    issues: Vec<CheckoutIssue>,
}

impl ErrorReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an issue.
    pub fn push(&mut self, issue: CheckoutIssue) {
        self.issues.push(issue);
    }

    /// Drops every issue collected so far.
    pub fn clear(&mut self) {
        self.issues.clear();
    }

    /// Returns true if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns the issues in the order they were found.
    pub fn issues(&self) -> &[CheckoutIssue] {
        &self.issues
    }

    /// Renders every issue as a shopper-facing message.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

impl From<Vec<CheckoutIssue>> for ErrorReport {
    fn from(issues: Vec<CheckoutIssue>) -> Self {
        Self { issues }
    }
}

impl FromIterator<CheckoutIssue> for ErrorReport {
    fn from_iter<T: IntoIterator<Item = CheckoutIssue>>(iter: T) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages().join(" | "))
    }
}

//! Request bodies accepted by the bill endpoints, and their validated commands.
//!
//! Raw bodies are loosely typed (amounts may arrive as strings, empty strings
//! mean "no value"). `into_command` turns them into a `BillCommand` whose
//! fields are already checked, so the ledger never sees unvalidated input.

use crate::{
    error::{BillError, BillResult},
    ledger::{BillPatch, NewBill},
    types::{BillId, Category, Money},
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// An amount as sent by a client: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub amount: Option<AmountInput>,
}

/// PATCH body. Either a mark-as-paid request or a sparse field edit.
///
/// For the editable fields the outer `Option` records whether the key was
/// present at all; the inner one whether it carried a value or `null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBillRequest {
    pub id: BillId,
    #[serde(default)]
    pub mark_as_paid: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Option<AmountInput>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteBillRequest {
    pub id: BillId,
}

/// A validated bill mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum BillCommand {
    Create(NewBill),
    Edit { id: BillId, patch: BillPatch },
    MarkPaid { id: BillId },
    Delete { id: BillId },
}

impl CreateBillRequest {
    pub fn into_command(self) -> BillResult<BillCommand> {
        let name = parse_name(self.name)?;
        let category = parse_category(self.category)?;
        let due_date = parse_due_date(self.due_date)?;
        // A zero amount on create means "no amount", as the form sends it.
        let amount = parse_amount(self.amount)?.filter(|a| *a != 0.0);
        Ok(BillCommand::Create(NewBill {
            name,
            category,
            due_date,
            amount,
        }))
    }
}

impl UpdateBillRequest {
    pub fn into_command(self) -> BillResult<BillCommand> {
        if self.mark_as_paid == Some(true) {
            return Ok(BillCommand::MarkPaid { id: self.id });
        }

        let name = match self.name {
            None => None,
            Some(None) => return Err(BillError::validation("name", "cannot be cleared")),
            Some(value) => Some(parse_name(value)?),
        };

        Ok(BillCommand::Edit {
            id: self.id,
            patch: BillPatch {
                name,
                category: self.category.map(parse_category).transpose()?,
                due_date: self.due_date.map(parse_due_date).transpose()?,
                amount: self.amount.map(parse_amount).transpose()?,
            },
        })
    }
}

impl DeleteBillRequest {
    pub fn into_command(self) -> BillCommand {
        BillCommand::Delete { id: self.id }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn parse_name(raw: Option<String>) -> BillResult<String> {
    let trimmed = raw.as_deref().map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(BillError::validation("name", "is required"));
    }
    Ok(trimmed.to_string())
}

fn parse_category(raw: Option<String>) -> BillResult<Category> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(Category::Other),
        Some(s) => s
            .parse::<Category>()
            .map_err(|e| BillError::validation("category", e.to_string())),
    }
}

/// Accepts `YYYY-MM-DD` or a full ISO date-time, of which only the date is kept.
fn parse_due_date(raw: Option<String>) -> BillResult<Option<NaiveDate>> {
    let Some(raw) = raw else { return Ok(None) };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| BillError::validation("dueDate", format!("'{raw}' is not a YYYY-MM-DD date")))
}

fn parse_amount(raw: Option<AmountInput>) -> BillResult<Option<Money>> {
    let value = match raw {
        None => return Ok(None),
        Some(AmountInput::Number(n)) => n,
        Some(AmountInput::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .map_err(|_| BillError::validation("amount", format!("'{s}' is not a number")))?
        }
    };
    if !value.is_finite() || value < 0.0 {
        return Err(BillError::validation(
            "amount",
            format!("{value} is not a non-negative amount"),
        ));
    }
    Ok(Some(value))
}

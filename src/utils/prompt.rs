//! Interactive prompts for filling an appointment draft.

use anyhow::Result;
use appointments_core::AppointmentDraft;
use appointments_core::appointment::{DISPLAY_DATE_FORMAT, normalize_time, parse_input_date};
use dialoguer::{Confirm, Input};

/// Ask for draft fields.
///
/// With `only_missing`, fields that already hold a value are left alone;
/// otherwise every field is asked with its current value as the default.
pub fn fill_draft(draft: &mut AppointmentDraft, only_missing: bool) -> Result<()> {
    if !(only_missing && draft.date.is_some()) {
        let current = draft.date.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string());
        let input = ask("  Date (DD/MM/YYYY)", current, |s| {
            parse_input_date(s)
                .map(|_| ())
                .ok_or_else(|| format!("'{}' is not a date", s))
        })?;
        draft.date = parse_input_date(&input);
    }

    if !(only_missing && !draft.time.trim().is_empty()) {
        let current = non_empty(&draft.time);
        let input = ask("  Time (HH:mm)", current, |s| {
            normalize_time(s)
                .map(|_| ())
                .ok_or_else(|| format!("'{}' is not a time", s))
        })?;
        draft.time = normalize_time(&input).unwrap_or(input);
    }

    for (label, value) in [
        ("  Customer", &mut draft.customer_name),
        ("  Address", &mut draft.address),
        ("  City", &mut draft.city),
    ] {
        if only_missing && !value.trim().is_empty() {
            continue;
        }
        *value = ask(label, non_empty(value), |s| {
            if s.trim().is_empty() {
                Err("Required".to_string())
            } else {
                Ok(())
            }
        })?;
    }

    if !(only_missing && draft.cost.is_some()) {
        let current = draft.cost.map(|c| format!("{:.2}", c));
        let input = ask("  Cost", current, |s| match s.trim().parse::<f64>() {
            Ok(c) if c.is_finite() && c >= 0.0 => Ok(()),
            Ok(_) => Err("Cost must be zero or more".to_string()),
            Err(_) => Err(format!("'{}' is not a number", s)),
        })?;
        draft.cost = input.trim().parse().ok();
    }

    Ok(())
}

/// Yes/no question that defaults to no.
pub fn confirm(prompt: &str) -> bool {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "confirmation prompt failed");
            false
        })
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn ask<V>(prompt: &str, current: Option<String>, validate: V) -> Result<String>
where
    V: Fn(&str) -> Result<(), String>,
{
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(current) = current {
        input = input.default(current);
    }

    let value = input
        .validate_with(|s: &String| validate(s))
        .interact_text()?;
    Ok(value)
}

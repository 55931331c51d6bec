//! Form records
//!
//! A form's labels are the labels associated with it: labels nested inside
//! the form, and labels elsewhere whose `for` names an element of the form.

use super::dom::{attr, classes, element_text, has_attr, opt_attr, selector};
use super::limits::{
    cap_list, truncate_chars, MAX_FORMS, MAX_FORM_BUTTONS, MAX_FORM_INPUTS, MAX_FORM_LABELS,
    MAX_SELECT_OPTIONS, SHORT_TEXT_CHARS,
};
use super::record::{ButtonRecord, FormRecord, InputRecord, LabelRecord, OptionRecord};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

static FORM: Lazy<Selector> = Lazy::new(|| selector("form"));
static FIELD: Lazy<Selector> = Lazy::new(|| selector("input, textarea, select"));
static OPTION: Lazy<Selector> = Lazy::new(|| selector("option"));
static BUTTON: Lazy<Selector> = Lazy::new(|| selector("button"));
static LABEL: Lazy<Selector> = Lazy::new(|| selector("label"));

pub(crate) fn extract_forms(document: &Html) -> Vec<FormRecord> {
    document
        .select(&FORM)
        .take(MAX_FORMS)
        .map(|form| form_record(document, form))
        .collect()
}

fn form_record(document: &Html, form: ElementRef<'_>) -> FormRecord {
    let method = opt_attr(&form, "method")
        .filter(|method| !method.is_empty())
        .unwrap_or_else(|| "GET".to_string())
        .to_uppercase();

    let inputs = form.select(&FIELD).map(|field| input_record(&field)).collect();
    let buttons = form
        .select(&BUTTON)
        .map(|button| ButtonRecord {
            button_type: opt_attr(&button, "type").unwrap_or_else(|| "submit".to_string()),
            name: attr(&button, "name"),
            value: attr(&button, "value"),
            text: truncate_chars(&element_text(&button), SHORT_TEXT_CHARS),
        })
        .collect();

    FormRecord {
        action: attr(&form, "action"),
        method,
        enctype: attr(&form, "enctype"),
        target: attr(&form, "target"),
        id: attr(&form, "id"),
        name: attr(&form, "name"),
        class: classes(&form),
        inputs: cap_list(inputs, MAX_FORM_INPUTS),
        buttons: cap_list(buttons, MAX_FORM_BUTTONS),
        labels: cap_list(form_labels(document, form), MAX_FORM_LABELS),
    }
}

fn input_record(field: &ElementRef<'_>) -> InputRecord {
    let tag = field.value().name().to_string();
    let options = (tag == "select").then(|| {
        let options = field
            .select(&OPTION)
            .map(|option| OptionRecord {
                value: attr(&option, "value"),
                text: truncate_chars(&element_text(&option), SHORT_TEXT_CHARS),
                selected: has_attr(&option, "selected"),
            })
            .collect();
        cap_list(options, MAX_SELECT_OPTIONS)
    });

    InputRecord {
        input_type: opt_attr(field, "type").unwrap_or_else(|| "text".to_string()),
        name: attr(field, "name"),
        id: attr(field, "id"),
        class: classes(field),
        placeholder: attr(field, "placeholder"),
        value: attr(field, "value"),
        required: has_attr(field, "required"),
        disabled: has_attr(field, "disabled"),
        readonly: has_attr(field, "readonly"),
        maxlength: opt_attr(field, "maxlength"),
        minlength: opt_attr(field, "minlength"),
        pattern: attr(field, "pattern"),
        autocomplete: attr(field, "autocomplete"),
        aria_label: attr(field, "aria-label"),
        options,
        tag,
    }
}

fn form_labels(document: &Html, form: ElementRef<'_>) -> Vec<LabelRecord> {
    let ids: HashSet<&str> = form
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter_map(|element| element.value().id())
        .collect();

    document
        .select(&LABEL)
        .filter(|label| {
            let nested = label.ancestors().any(|ancestor| ancestor.id() == form.id());
            let targets_form = label
                .value()
                .attr("for")
                .is_some_and(|target| ids.contains(target));
            nested || targets_form
        })
        .map(|label| LabelRecord {
            for_id: attr(&label, "for"),
            text: truncate_chars(&element_text(&label), SHORT_TEXT_CHARS),
        })
        .collect()
}

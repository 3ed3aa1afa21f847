use handlebars::{Handlebars, RenderError, no_escape};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use time::Date;

use crate::export::snapshot::CollectedAnswers;

/// Characters left alone by `encodeURIComponent`-style escaping.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const SUBJECT_TEMPLATE: &str = "SRE Readiness Assessment - {{app_name}}";

const BODY_TEMPLATE: &str = "Dear SRE Team,

Please find attached the SRE Readiness Assessment for {{app_name}}.

Assessment Summary:
- Application: {{app_name}}
- PO Name: {{po_name}}
- Application Type: {{app_type}}
- Location: {{location}}
- Assessment Date: {{date}}

The CSV file contains detailed responses to all assessment questions.
Mail links cannot carry attachments: attach {{filename}} before sending.

Best regards,
SRE Readiness Assessment Tool";

#[derive(Serialize)]
struct DraftContext<'a> {
    app_name: &'a str,
    po_name: &'a str,
    app_type: String,
    location: &'a str,
    date: String,
    filename: &'a str,
}

/// Subject and body of the hand-off mail for an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    pub fn render(
        data: &CollectedAnswers,
        date: Date,
        attachment: &str,
    ) -> Result<Self, RenderError> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(true);
        engine.register_escape_fn(no_escape);

        let app_type = if data.app_type == "other" {
            format!("{} ({})", data.app_type, data.app_type_other)
        } else {
            data.app_type.clone()
        };
        let location = if data.loc_selected.is_empty() {
            "Not specified"
        } else {
            data.loc_selected.as_str()
        };
        let ctx = DraftContext {
            app_name: &data.app_name,
            po_name: &data.po_name,
            app_type,
            location,
            date: date.to_string(),
            filename: attachment,
        };

        Ok(Self {
            subject: engine.render_template(SUBJECT_TEMPLATE, &ctx)?,
            body: engine.render_template(BODY_TEMPLATE, &ctx)?,
        })
    }

    /// `mailto:` link pre-filling subject and body.
    pub fn mailto(&self, recipient: &str) -> String {
        format!(
            "mailto:{recipient}?subject={}&body={}",
            utf8_percent_encode(&self.subject, URI_COMPONENT),
            utf8_percent_encode(&self.body, URI_COMPONENT)
        )
    }
}

use crate::domain::ServiceQuote;
use crate::selector::comparison::{ServiceComparison, ServiceList, ServiceSelection};
use crate::selector::currency::format_currency;
use std::fmt::{self, Write};
use tracing::error;

pub const DEFAULT_HEADER_COLUMNS: [&str; 5] =
    ["Service Provider", "Carrier", "Service", "Price", ""];

const NO_SERVICES: &str = "No Services Available";
const NO_PREFERRED_SERVICES: &str = "No Preferred Services Available";

const STYLESHEET: &str = r#"<style type="text/css" media="screen">
.modal-dialog {
	width: 750px;
}
.service-info {
	vertical-align: middle !important;
	padding-left: 12px !important;
}
.btn:hover {
	background-color: #dedede;
}
</style>
"#;

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the service selector dialog body
pub struct ComparisonRenderer {
    default_currency: String,
}

impl ComparisonRenderer {
    pub fn new(default_currency: impl Into<String>) -> Self {
        Self {
            default_currency: default_currency.into(),
        }
    }

    pub fn render(&self, comparison: &ServiceComparison, header_columns: &[String]) -> String {
        let mut html = String::new();
        if let Err(e) = self.render_into(&mut html, comparison, header_columns) {
            error!("Failed to render service comparison: {}", e);
        }
        html
    }

    pub fn render_into<W: Write>(
        &self,
        out: &mut W,
        comparison: &ServiceComparison,
        header_columns: &[String],
    ) -> fmt::Result {
        if comparison.is_empty() {
            write_empty_state(out, NO_SERVICES)?;
        } else {
            writeln!(out, r#"<div style="overflow-x:scroll;">"#)?;

            writeln!(out, "<h5>Preferred Services</h5>")?;
            if comparison.preferred_services.is_empty() {
                write_empty_state(out, NO_PREFERRED_SERVICES)?;
            } else {
                self.write_table(out, ServiceList::Preferred, comparison, header_columns)?;
            }

            writeln!(out, "<h5>Other Services</h5>")?;
            if comparison.other_services.is_empty() {
                write_empty_state(out, NO_SERVICES)?;
            } else {
                self.write_table(out, ServiceList::Other, comparison, header_columns)?;
            }

            writeln!(out, "</div>")?;
        }
        out.write_str(STYLESHEET)
    }

    fn write_table<W: Write>(
        &self,
        out: &mut W,
        list: ServiceList,
        comparison: &ServiceComparison,
        header_columns: &[String],
    ) -> fmt::Result {
        writeln!(out, r#"<table class="table table-bordered table-hover">"#)?;
        writeln!(out, r#"<thead class="grid-heading-row"><tr>"#)?;
        for column in header_columns {
            writeln!(
                out,
                r#"<th style="padding-left: 12px;">{}</th>"#,
                escape_html(column)
            )?;
        }
        writeln!(out, "</tr></thead>")?;

        writeln!(out, "<tbody>")?;
        for (index, quote) in comparison.services(list).iter().enumerate() {
            self.write_row(out, ServiceSelection::new(list, index), quote)?;
        }
        writeln!(out, "</tbody>")?;
        writeln!(out, "</table>")
    }

    fn write_row<W: Write>(
        &self,
        out: &mut W,
        selection: ServiceSelection,
        quote: &ServiceQuote,
    ) -> fmt::Result {
        let id = selection.element_id();
        let currency = quote
            .currency
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(&self.default_currency);

        writeln!(out, r#"<tr id="{}">"#, id)?;
        for (width, value) in [
            (20, quote.service_provider.as_str()),
            (20, quote.carrier.as_str()),
            (40, quote.service_name.as_str()),
        ] {
            writeln!(
                out,
                r#"<td class="service-info" style="width:{}%;">{}</td>"#,
                width,
                escape_html(value)
            )?;
        }
        writeln!(
            out,
            r#"<td class="service-info" style="width:20%;">{}</td>"#,
            escape_html(&format_currency(quote.total_price, currency, 2))
        )?;
        writeln!(
            out,
            r#"<td style="width:10%;vertical-align: middle;"><button data-type="{}" id="{}" type="button" class="btn">Select</button></td>"#,
            selection.list.data_type(),
            id
        )?;
        writeln!(out, "</tr>")
    }
}

fn write_empty_state<W: Write>(out: &mut W, message: &str) -> fmt::Result {
    writeln!(
        out,
        r#"<div style="text-align: center; padding: 10px;"><span class="text-muted">{}</span></div>"#,
        message
    )
}

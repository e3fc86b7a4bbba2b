use crate::types::{Invoice, LineItem, SummaryLine};

const TAX_PERCENT: i64 = 19;

impl Invoice {
    /// A complete sample invoice, useful as a template for new records.
    ///
    /// Subtotal, tax and total are computed from the line items.
    pub fn example() -> Self {
        let items = vec![
            LineItem {
                date: "04.03.2019".to_string(),
                description: "Beratung\nAnalyse der bestehenden Abläufe".to_string(),
                amount_cents: 6188,
            },
            LineItem {
                date: "11.03.2019".to_string(),
                description: "Umsetzung".to_string(),
                amount_cents: 2652,
            },
            LineItem {
                date: "18.03.2019".to_string(),
                description: "Dokumentation".to_string(),
                amount_cents: 884,
            },
        ];

        let subtotal: i64 = items.iter().map(|item| item.amount_cents).sum();
        let tax = (subtotal * TAX_PERCENT + 50) / 100;

        Self {
            file_name: Some("Rechnung-2019-04.pdf".into()),
            sender: "Erika Mustermann\nMusterweg 1\n12345 Musterstadt".to_string(),
            sender_line: "Erika Mustermann · Musterweg 1 · 12345 Musterstadt".to_string(),
            recipient: "Beispiel GmbH\nMax Beispiel\nHauptstraße 5\n54321 Beispielstadt".to_string(),
            place_date: "Musterstadt, 01.04.2019".to_string(),
            number: "Rechnung 2019-04".to_string(),
            cover_letter: "Sehr geehrter Herr Beispiel,\n\nfür meine Leistungen im März \
                           berechne ich Ihnen:"
                .to_string(),
            header: [
                "Datum".to_string(),
                "Leistung".to_string(),
                "Betrag".to_string(),
            ],
            items,
            subtotal: Some(SummaryLine {
                label: "Summe".to_string(),
                amount_cents: subtotal,
            }),
            tax: Some(SummaryLine {
                label: format!("USt. {}%", TAX_PERCENT),
                amount_cents: tax,
            }),
            total: Some(SummaryLine {
                label: "Gesamt".to_string(),
                amount_cents: subtotal + tax,
            }),
            footer: "Bankverbindung: Musterbank · IBAN DE00 0000 0000 0000 0000 00".to_string(),
        }
    }
}

use crate::constants::*;
use crate::options::RenderOptions;
use crate::types::{Invoice, Result, SummaryLine};
use log::debug;
use printpdf::*;
use std::path::Path;

pub fn generate_pdf(invoice: &Invoice, options: &RenderOptions, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();
    let bytes = render_invoice(invoice, options)?;
    std::fs::write(output_path, bytes)?;
    debug!("Rendered invoice {} to {}", invoice.number, output_path.display());
    Ok(())
}

pub fn render_invoice(invoice: &Invoice, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new(&options.title);
    let mut sheet = Sheet::new(options);
    let format = &options.number_format;

    let mut y = SENDER_TOP_MM;
    for line in invoice.sender.split('\n') {
        sheet.text(SUMMARY_LABEL_MM, y, BuiltinFont::Helvetica, BODY_FONT_SIZE, line);
        y -= pt_to_mm(LINE_ADVANCE_PT);
    }

    sheet.text(
        LEFT_MM,
        SENDER_LINE_MM,
        BuiltinFont::Helvetica,
        SENDER_LINE_FONT_SIZE,
        &invoice.sender_line,
    );
    sheet.rule(LEFT_MM, SENDER_LINE_RULE_END_MM, SENDER_LINE_MM - RULE_GAP_MM);

    let mut y = RECIPIENT_TOP_MM;
    for line in invoice.recipient.split('\n') {
        sheet.text(LEFT_MM, y, BuiltinFont::Helvetica, BODY_FONT_SIZE, line);
        y -= pt_to_mm(LINE_ADVANCE_PT);
    }

    sheet.text(SUMMARY_LABEL_MM, DATE_MM, BuiltinFont::Helvetica, BODY_FONT_SIZE, &invoice.place_date);
    sheet.text_centered(
        CENTER_MM,
        NUMBER_MM,
        BuiltinFont::HelveticaBold,
        BODY_FONT_SIZE,
        &invoice.number,
    );

    let mut y = LETTER_TOP_MM;
    for line in invoice.cover_letter.split('\n') {
        sheet.text(LEFT_MM, y, BuiltinFont::Helvetica, BODY_FONT_SIZE, line);
        y -= pt_to_mm(LINE_ADVANCE_PT);
    }
    y -= pt_to_mm(LINE_ADVANCE_PT);

    // Table header
    let [date_title, description_title, amount_title] = &invoice.header;
    sheet.text(LEFT_MM, y, BuiltinFont::Helvetica, BODY_FONT_SIZE, date_title);
    sheet.text(DESCRIPTION_MM, y, BuiltinFont::Helvetica, BODY_FONT_SIZE, description_title);
    sheet.text_right(RIGHT_MM, y, BuiltinFont::Helvetica, BODY_FONT_SIZE, amount_title);
    sheet.rule(LEFT_MM, RIGHT_MM, y - RULE_GAP_MM);
    y -= pt_to_mm(LINE_ADVANCE_PT + LINE_ADVANCE_PT / 2.0);

    // Rows
    for item in &invoice.items {
        sheet.text(LEFT_MM, y, BuiltinFont::Helvetica, BODY_FONT_SIZE, &item.date);
        sheet.text_right(
            RIGHT_MM,
            y,
            BuiltinFont::Helvetica,
            BODY_FONT_SIZE,
            &format.format_amount(item.amount_cents),
        );
        for line in item.description.split('\n') {
            sheet.text(DESCRIPTION_MM, y, BuiltinFont::Helvetica, BODY_FONT_SIZE, line);
            y -= pt_to_mm(LINE_ADVANCE_PT);
        }

        if y < BREAK_BELOW_MM {
            sheet.next_page();
            y = CONTINUATION_TOP_MM;
        }
    }

    // Summary
    if let Some(subtotal) = &invoice.subtotal {
        y += pt_to_mm(LINE_ADVANCE_PT);
        sheet.rule(SUMMARY_RULE_MM, RIGHT_MM, y - RULE_GAP_MM);
        y -= pt_to_mm(LINE_ADVANCE_PT * 1.5);
        sheet.summary_line(y, subtotal);
        y -= pt_to_mm(LINE_ADVANCE_PT);
    }

    if let Some(tax) = &invoice.tax {
        y -= pt_to_mm(LINE_ADVANCE_PT / 2.0);
        sheet.summary_line(y, tax);
        sheet.rule(SUMMARY_RULE_MM, RIGHT_MM, y - RULE_GAP_MM);
        y -= pt_to_mm(LINE_ADVANCE_PT);
    }

    if let Some(total) = &invoice.total {
        y -= pt_to_mm(LINE_ADVANCE_PT / 2.0);
        sheet.summary_line(y, total);
        sheet.rule(SUMMARY_RULE_MM, RIGHT_MM, y - RULE_GAP_MM);
        sheet.rule(SUMMARY_RULE_MM, RIGHT_MM, y - RULE_GAP_MM - DOUBLE_RULE_GAP_MM);
    }

    let mut y = FOOTER_TOP_MM;
    for line in invoice.footer.split('\n') {
        sheet.text(LEFT_MM, y, BuiltinFont::Helvetica, FOOTER_FONT_SIZE, line);
        y -= pt_to_mm(LINE_ADVANCE_PT);
    }

    doc.pages = sheet.finish();
    debug!("Invoice {} laid out on {} pages", invoice.number, doc.pages.len());

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    Ok(bytes)
}

/// Accumulates drawing operations page by page
struct Sheet<'a> {
    options: &'a RenderOptions,
    pages: Vec<PdfPage>,
    ops: Vec<Op>,
}

impl<'a> Sheet<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            pages: Vec::new(),
            ops: vec![Op::SetOutlineThickness {
                pt: Pt(RULE_WIDTH_PT),
            }],
        }
    }

    fn text(&mut self, x_mm: f32, y_mm: f32, font: BuiltinFont, size: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point {
                x: Mm(x_mm).into_pt(),
                y: Mm(y_mm).into_pt(),
            },
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            font,
            size: Pt(size),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font,
        });
        self.ops.push(Op::EndTextSection);
    }

    fn text_right(&mut self, right_mm: f32, y_mm: f32, font: BuiltinFont, size: f32, text: &str) {
        let x_mm = right_mm - text_width_mm(text, size);
        self.text(x_mm, y_mm, font, size, text);
    }

    fn text_centered(&mut self, center_mm: f32, y_mm: f32, font: BuiltinFont, size: f32, text: &str) {
        let x_mm = center_mm - text_width_mm(text, size) / 2.0;
        self.text(x_mm, y_mm, font, size, text);
    }

    fn summary_line(&mut self, y_mm: f32, line: &SummaryLine) {
        let amount = self.options.number_format.format_amount(line.amount_cents);
        self.text(SUMMARY_LABEL_MM, y_mm, BuiltinFont::Helvetica, BODY_FONT_SIZE, &line.label);
        self.text_right(
            RIGHT_MM,
            y_mm,
            BuiltinFont::Helvetica,
            BODY_FONT_SIZE,
            &amount,
        );
    }

    fn rule(&mut self, x1_mm: f32, x2_mm: f32, y_mm: f32) {
        self.ops.push(Op::DrawLine {
            line: Line {
                points: vec![
                    LinePoint {
                        p: Point {
                            x: Mm(x1_mm).into_pt(),
                            y: Mm(y_mm).into_pt(),
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Mm(x2_mm).into_pt(),
                            y: Mm(y_mm).into_pt(),
                        },
                        bezier: false,
                    },
                ],
                is_closed: false,
            },
        });
    }

    fn next_page(&mut self) {
        let ops = std::mem::replace(
            &mut self.ops,
            vec![Op::SetOutlineThickness {
                pt: Pt(RULE_WIDTH_PT),
            }],
        );
        self.pages.push(PdfPage::new(
            Mm(self.options.page_width_mm),
            Mm(self.options.page_height_mm),
            ops,
        ));
    }

    fn finish(mut self) -> Vec<PdfPage> {
        self.next_page();
        self.pages
    }
}

/// Approximate rendered width of `text` in millimetres
fn text_width_mm(text: &str, size: f32) -> f32 {
    pt_to_mm(text.chars().count() as f32 * size * HELVETICA_CHAR_WIDTH_RATIO)
}

//! Sale receipt layout.

use retailops_sales::Receipt;

use super::format::{PAPER_WIDTH, center, columns, html_document, money, separator, truncate, wrap};

const FOOTER: [&str; 2] = ["Thank you for shopping", "Goods sold are not returnable"];

pub struct ReceiptView<'a> {
    receipt: &'a Receipt,
    width: usize,
}

impl<'a> ReceiptView<'a> {
    pub fn new(receipt: &'a Receipt) -> Self {
        Self {
            receipt,
            width: PAPER_WIDTH,
        }
    }

    pub fn render(&self) -> String {
        let r = self.receipt;
        let w = self.width;
        let mut lines: Vec<String> = Vec::new();

        lines.extend(wrap(&r.branch_name, w).iter().map(|l| center(l, w)));
        if let Some(address) = r.branch_address.as_deref() {
            lines.extend(wrap(address, w).iter().map(|l| center(l, w)));
        }
        lines.push(separator(w));

        // A UUID is wider than the paper.
        lines.push("No:".to_string());
        lines.extend(wrap(&r.transaction_id.to_string(), w));
        lines.push(format!("Date   : {}", r.created_at.format("%d/%m/%Y %H:%M")));
        lines.push(truncate(&format!("Cashier: {}", r.cashier_name), w));
        if let Some(member) = r.member_name.as_deref() {
            lines.push(truncate(&format!("Member : {member}"), w));
        }
        lines.push(separator(w));

        for line in &r.lines {
            lines.extend(wrap(&line.name, w));
            lines.push(columns(
                &format!("  {} x {}", line.quantity, money(line.price)),
                &money(line.subtotal),
                w,
            ));
        }
        lines.push(separator(w));

        lines.push(columns("Items", &r.item_count().to_string(), w));
        lines.push(columns("Total", &money(r.total), w));
        lines.push(columns("Paid", &money(r.paid), w));
        lines.push(columns("Change", &money(r.change), w));
        lines.push(separator(w));

        lines.extend(FOOTER.iter().map(|l| center(l, w)));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    pub fn to_html(&self) -> String {
        html_document(&format!("Receipt {}", self.receipt.transaction_id), &self.render())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use retailops_core::TransactionId;
    use retailops_sales::ReceiptLine;

    use super::*;

    fn receipt() -> Receipt {
        Receipt {
            transaction_id: TransactionId::new(),
            branch_name: "Toko Sinar Jaya".to_string(),
            branch_address: Some("Jl. Merdeka No. 10, Bandung".to_string()),
            cashier_name: "Sari".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
            lines: vec![
                ReceiptLine {
                    name: "Kopi Bubuk Robusta Premium 250 gram".to_string(),
                    quantity: 2,
                    price: 35_000,
                    subtotal: 70_000,
                },
                ReceiptLine {
                    name: "Gula".to_string(),
                    quantity: 1,
                    price: 16_500,
                    subtotal: 16_500,
                },
            ],
            total: 86_500,
            paid: 100_000,
            change: 13_500,
            member_name: None,
        }
    }

    #[test]
    fn every_line_fits_the_paper() {
        let text = ReceiptView::new(&receipt()).render();
        for line in text.lines() {
            assert!(line.chars().count() <= PAPER_WIDTH, "too wide: {line:?}");
        }
    }

    #[test]
    fn totals_are_right_aligned() {
        let text = ReceiptView::new(&receipt()).render();
        let total = text.lines().find(|l| l.starts_with("Total")).unwrap();
        assert!(total.ends_with("86.500"));
        assert_eq!(total.chars().count(), PAPER_WIDTH);
        assert!(text.contains("  2 x 35.000"));
        assert!(text.contains("01/03/2026 09:30"));
        assert!(!text.contains("Member"));
    }

    #[test]
    fn member_line_only_when_present() {
        let mut r = receipt();
        r.member_name = Some("Budi".to_string());
        assert!(ReceiptView::new(&r).render().contains("Member : Budi"));
    }

    #[test]
    fn html_wraps_escaped_text() {
        let mut r = receipt();
        r.branch_name = "A&B".to_string();
        let html = ReceiptView::new(&r).to_html();
        assert!(html.contains("A&amp;B"));
        assert!(html.contains("58mm"));
    }
}

//! Shelf price labels.

use retailops_inventory::Label;

use super::format::{PAPER_WIDTH, html_document, money, right, separator, truncate, wrap};

/// Name lines kept per label before truncating.
const NAME_LINES: usize = 2;

pub struct LabelView<'a> {
    labels: &'a [Label],
    width: usize,
}

impl<'a> LabelView<'a> {
    pub fn new(labels: &'a [Label]) -> Self {
        Self {
            labels,
            width: PAPER_WIDTH,
        }
    }

    fn render_one(&self, label: &Label) -> Vec<String> {
        let w = self.width;
        let mut lines: Vec<String> = wrap(&label.name, w).into_iter().take(NAME_LINES).collect();
        lines.push(truncate(&label.code, w));

        let price = match label.unit_name.as_deref() {
            Some(unit) => format!("Rp {} / {}", money(label.sell_price), unit),
            None => format!("Rp {}", money(label.sell_price)),
        };
        lines.push(right(&price, w));
        lines
    }

    pub fn render(&self) -> String {
        let blocks: Vec<String> = self
            .labels
            .iter()
            .map(|l| self.render_one(l).join("\n"))
            .collect();
        let mut out = blocks.join(&format!("\n{}\n", separator(self.width)));
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    pub fn to_html(&self) -> String {
        html_document("Labels", &self.render())
    }
}

#[cfg(test)]
mod tests {
    use retailops_core::ItemId;

    use super::*;

    fn label(name: &str, unit: Option<&str>) -> Label {
        Label {
            item_id: ItemId::new(),
            code: "BRG-0001".to_string(),
            name: name.to_string(),
            sell_price: 4_500,
            unit_name: unit.map(str::to_string),
        }
    }

    #[test]
    fn one_block_per_label() {
        let labels = [label("Teh Botol", Some("pcs")), label("Mie Instan", None)];
        let text = LabelView::new(&labels).render();
        assert_eq!(text.matches("BRG-0001").count(), 2);
        assert!(text.contains("Rp 4.500 / pcs"));
        assert_eq!(text.lines().filter(|l| *l == separator(PAPER_WIDTH)).count(), 1);
    }

    #[test]
    fn long_names_are_cut_to_two_lines() {
        let name = "Sabun Cuci Piring Jeruk Nipis Ekstra Wangi Isi Ulang 800 ml Hemat";
        let labels = [label(name, None)];
        let text = LabelView::new(&labels).render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), NAME_LINES + 2);
        assert!(lines.iter().all(|l| l.chars().count() <= PAPER_WIDTH));
        assert!(lines[3].ends_with("Rp 4.500"));
    }

    #[test]
    fn no_labels_render_nothing() {
        assert_eq!(LabelView::new(&[]).render(), "");
    }
}

use crate::kiosk::model::menu::MenuItem;
use crate::kiosk::model::order::OrderLine;

/// One aggregated entry per distinct menu item; name/price are copied at time
/// of add so a catalog change cannot reprice a cart mid-session.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CartLine {
    pub item_id: u32,
    pub name: String,
    pub price: f64,
    pub qty: u32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the existing line for the item, or append a new line with qty 1.
    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            line.qty += 1;
            return;
        }
        self.lines.push(CartLine {
            item_id: item.id,
            name: item.name.to_string(),
            price: item.price,
            qty: 1,
        });
    }

    /// no-op when the id has no line
    pub fn remove_item(&mut self, id: u32) {
        self.lines.retain(|l| l.item_id != id);
    }

    /// Adjust a line's quantity by a signed delta, clamped to a minimum of 1.
    /// Never removes the line; use [`Cart::remove_item`] for that.
    pub fn change_qty(&mut self, id: u32, delta: i32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == id) {
            line.qty = i64::max(1, line.qty as i64 + delta as i64) as u32;
        }
    }

    /// sum of price × qty over all lines, rounded to 2 decimal places
    pub fn total(&self) -> f64 {
        let sum = self.lines.iter().map(|l| l.price * l.qty as f64).sum::<f64>();
        (sum * 100.0).round() / 100.0
    }

    /// sum of quantities, shown as the cart badge
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// the order payload lines, in insertion order
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|l| OrderLine {
                item: l.name.clone(),
                qty: l.qty,
                price: l.price,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiosk::model::menu::find_item;

    #[test]
    fn repeated_add_merges_into_one_line() {
        let mut cart = Cart::new();
        let croissant = find_item(4).unwrap();
        cart.add_item(croissant);
        cart.add_item(croissant);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].qty, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn change_qty_clamps_at_one() {
        let mut cart = Cart::new();
        cart.add_item(find_item(6).unwrap());
        cart.change_qty(6, -100);
        assert_eq!(cart.lines()[0].qty, 1);
        cart.change_qty(6, 3);
        assert_eq!(cart.lines()[0].qty, 4);
        cart.change_qty(6, -2);
        assert_eq!(cart.lines()[0].qty, 2);
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(find_item(4).unwrap());
        let before = cart.clone();
        cart.remove_item(99);
        assert_eq!(cart, before);
    }

    #[test]
    fn remove_keeps_other_lines_intact() {
        let mut cart = Cart::new();
        cart.add_item(find_item(4).unwrap());
        cart.add_item(find_item(6).unwrap());
        cart.add_item(find_item(6).unwrap());
        cart.remove_item(4);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].item_id, 6);
        assert_eq!(cart.lines()[0].qty, 2);
    }

    #[test]
    fn total_is_stable_under_add_reordering() {
        let (a, b) = (find_item(4).unwrap(), find_item(7).unwrap());
        let mut one = Cart::new();
        one.add_item(a);
        one.add_item(b);
        one.add_item(a);
        let mut other = Cart::new();
        other.add_item(b);
        other.add_item(a);
        other.add_item(a);
        assert_eq!(one.total(), other.total());
        assert_eq!(one.total(), 2.0 * 20.0 + 150.0);
    }

    #[test]
    fn total_rounds_to_two_decimals() {
        let mut cart = Cart::new();
        let item = MenuItem { id: 42, name: "Sample", price: 0.1 };
        for _ in 0..3 {
            cart.add_item(&item);
        }
        assert_eq!(cart.total(), 0.3);
    }
}

//! static menu catalog, defined at process start and never mutated

#[derive(Debug)]
pub(crate) struct MenuCategory {
    pub name: &'static str,
    pub items: &'static [MenuItem],
}

#[derive(Debug)]
pub(crate) struct MenuItem {
    pub id: u32,
    pub name: &'static str,
    pub price: f64,
}

pub(crate) const MENU: &[MenuCategory] = &[
    MenuCategory {
        name: "Cakes",
        items: &[
            MenuItem { id: 1, name: "Lounge Elegance Espresso", price: 35.0 },
            MenuItem { id: 2, name: "Velvet Mocha Delight", price: 45.0 },
            MenuItem { id: 3, name: "Caramel Macchiato Symphony", price: 40.0 },
        ],
    },
    MenuCategory {
        name: "Pastries",
        items: &[
            MenuItem { id: 4, name: "Butter Croissant", price: 20.0 },
            MenuItem { id: 5, name: "Chocolate Danish", price: 300.0 },
        ],
    },
    MenuCategory {
        name: "Mojitos",
        items: &[
            MenuItem { id: 6, name: "Classic Mint Mojito", price: 120.0 },
            MenuItem { id: 7, name: "Strawberry Mojito", price: 150.0 },
            MenuItem { id: 8, name: "Lemon Mojito", price: 130.0 },
            MenuItem { id: 9, name: "Blue Curacao Mojito", price: 160.0 },
            MenuItem { id: 10, name: "Watermelon Mojito", price: 140.0 },
        ],
    },
];

pub(crate) fn find_item(id: u32) -> Option<&'static MenuItem> {
    MENU.iter().flat_map(|c| c.items).find(|i| i.id == id)
}

//! main file for the kiosk

pub(crate) mod error;
pub(crate) mod model;
pub(crate) mod notify;
pub(crate) mod receipt;
pub(crate) mod service;
pub(crate) mod session;
pub(crate) mod table;
pub(crate) mod util;

use crate::kiosk::model::cart::Cart;
use crate::kiosk::model::config::KioskConfig;
use crate::kiosk::model::menu;
use crate::kiosk::notify::{StaffNotifier, WhatsAppNotifier};
use crate::kiosk::receipt::{receipt_text, ReceiptRenderer, TextRenderer, EXPORT_SETTLE_DELAY};
use crate::kiosk::service::{HttpOrderService, OrderService};
use crate::kiosk::session::OrderSession;
use crate::kiosk::table::TableContext;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

enum Flow {
    Continue,
    Quit,
}

/// Run an interactive ordering session for one table.
pub async fn run(config: KioskConfig, table: Option<TableContext>) -> Result<(), anyhow::Error> {
    let KioskConfig {
        service_url,
        staff_phone,
        export_dir,
    } = config;
    let mut session = OrderSession::new(
        HttpOrderService::new(service_url),
        WhatsAppNotifier::new(staff_phone),
        TextRenderer,
        table,
        export_dir,
        EXPORT_SETTLE_DELAY,
    );

    println!("Café Menu");
    match session.table() {
        Some(table) => println!("Table: {}", table.id),
        None => println!("No table resolved; scan a valid QR code before ordering."),
    }
    print_menu();
    print_help();

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = input.next_line().await? {
        match dispatch(&mut session, line.trim(), &mut input).await? {
            Flow::Quit => break,
            Flow::Continue => prompt()?,
        }
    }
    Ok(())
}

async fn dispatch<S, N, R, I>(
    session: &mut OrderSession<S, N, R>,
    line: &str,
    input: &mut Lines<I>,
) -> Result<Flow, anyhow::Error>
where
    S: OrderService,
    N: StaffNotifier,
    R: ReceiptRenderer + Clone + Send + 'static,
    I: AsyncBufRead + Unpin,
{
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("menu") => print_menu(),
        Some("add") => match parse_id(parts.next()) {
            Some(id) => match menu::find_item(id) {
                Some(item) => {
                    session.add_item(item);
                    println!("added {} (cart: {})", item.name, session.cart().item_count());
                }
                None => println!("no menu item with id {}", id),
            },
            None => println!("usage: add <menu item id>"),
        },
        Some("remove") => match parse_id(parts.next()) {
            Some(id) => {
                session.remove_item(id);
                println!("cart: {}", session.cart().item_count());
            }
            None => println!("usage: remove <menu item id>"),
        },
        Some("qty") => {
            match (parse_id(parts.next()), parts.next().and_then(|d| d.parse::<i32>().ok())) {
                (Some(id), Some(delta)) => {
                    session.change_qty(id, delta);
                    println!("cart: {}", session.cart().item_count());
                }
                _ => println!("usage: qty <menu item id> <delta>"),
            }
        }
        Some("cart") => match session.open_cart() {
            Ok(()) => print_cart(session.cart()),
            Err(e) => println!("{}", e),
        },
        Some("close") => session.close_cart(),
        Some("checkout") => checkout(session, input).await?,
        Some("receipt") => match session.confirmation() {
            Some(conf) => println!("{}", receipt_text(conf)),
            None => println!("no order submitted yet"),
        },
        Some("dismiss") => session.dismiss_receipt(),
        Some("help") => print_help(),
        Some("quit") | Some("exit") => return Ok(Flow::Quit),
        Some(other) => println!("unknown command '{}', try 'help'", other),
    }
    Ok(Flow::Continue)
}

/// Collect the customer form and submit the order.
async fn checkout<S, N, R, I>(
    session: &mut OrderSession<S, N, R>,
    input: &mut Lines<I>,
) -> Result<(), anyhow::Error>
where
    S: OrderService,
    N: StaffNotifier,
    R: ReceiptRenderer + Clone + Send + 'static,
    I: AsyncBufRead + Unpin,
{
    if let Err(e) = session.open_cart() {
        println!("{}", e);
        return Ok(());
    }
    print_cart(session.cart());

    print!("Your Name: ");
    std::io::stdout().flush()?;
    let Some(name) = input.next_line().await? else {
        return Ok(());
    };
    session.set_name(name.trim());

    print!("Phone Number: ");
    std::io::stdout().flush()?;
    let Some(number) = input.next_line().await? else {
        return Ok(());
    };
    session.set_number(number.trim());

    match session.submit().await {
        Ok(conf) => {
            println!("{}", receipt_text(conf));
            println!("Staff has been notified over WhatsApp.");
            println!("A copy of the receipt is being saved as Order_{}.", conf.order_id);
        }
        Err(e) if e.is_submission_failure() => {
            println!("Server error. Please try again later.");
        }
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn parse_id(arg: Option<&str>) -> Option<u32> {
    arg.and_then(|s| s.parse().ok())
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

fn print_menu() {
    for category in menu::MENU {
        println!("{}", category.name);
        for item in category.items {
            println!("  [{}] {} - Rs:{}", item.id, item.name, item.price);
        }
    }
}

fn print_cart(cart: &Cart) {
    println!("Your Cart");
    for line in cart.lines() {
        println!("  {} - Rs:{} × {}", line.name, line.price, line.qty);
    }
    println!("Total: Rs:{:.2}", cart.total());
}

fn print_help() {
    println!("commands: menu | add <id> | remove <id> | qty <id> <delta> | cart | close | checkout | receipt | dismiss | help | quit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiosk::notify::MockNotifier;
    use crate::kiosk::service::MockOrderService;
    use crate::kiosk::session::SessionState;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;

    fn shell_session(
        service: MockOrderService,
        dir: &TempDir,
    ) -> OrderSession<MockOrderService, MockNotifier, TextRenderer> {
        OrderSession::new(
            service,
            MockNotifier::new(),
            TextRenderer,
            Some(TableContext { id: "1".to_string() }),
            dir.path().to_path_buf(),
            Duration::from_millis(10),
        )
    }

    fn no_input() -> Lines<BufReader<&'static [u8]>> {
        BufReader::new(&b""[..]).lines()
    }

    #[tokio::test]
    async fn add_and_remove_commands_drive_the_cart() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = shell_session(
            MockOrderService::replying(json!({ "order_id": "X1" })),
            &dir,
        );
        let mut input = no_input();
        dispatch(&mut s, "add 4", &mut input).await.unwrap();
        dispatch(&mut s, "add 4", &mut input).await.unwrap();
        dispatch(&mut s, "add 6", &mut input).await.unwrap();
        dispatch(&mut s, "remove 6", &mut input).await.unwrap();
        assert_eq!(s.cart().lines().len(), 1);
        assert_eq!(s.cart().item_count(), 2);

        dispatch(&mut s, "add nonsense", &mut input).await.unwrap();
        dispatch(&mut s, "add 99", &mut input).await.unwrap();
        assert_eq!(s.cart().item_count(), 2);
    }

    #[tokio::test]
    async fn quit_ends_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = shell_session(
            MockOrderService::replying(json!({ "order_id": "X1" })),
            &dir,
        );
        let mut input = no_input();
        assert!(matches!(
            dispatch(&mut s, "quit", &mut input).await.unwrap(),
            Flow::Quit
        ));
    }

    #[tokio::test]
    async fn checkout_reads_the_form_and_submits() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = shell_session(
            MockOrderService::replying(json!({ "order_id": "X1", "total_price": "40.00" })),
            &dir,
        );
        let mut input = BufReader::new(&b"Asha\n9000000000\n"[..]).lines();
        dispatch(&mut s, "add 4", &mut input).await.unwrap();
        dispatch(&mut s, "add 4", &mut input).await.unwrap();
        dispatch(&mut s, "checkout", &mut input).await.unwrap();

        assert_eq!(s.state(), SessionState::ReceiptShown);
        assert_eq!(s.confirmation().unwrap().order_id, "X1");
        let calls = s.service.calls.lock().unwrap();
        assert_eq!(calls[0].name, "Asha");
        assert_eq!(calls[0].number, "9000000000");
    }
}

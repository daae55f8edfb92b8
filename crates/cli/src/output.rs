//! Terminal rendering for command results.
//!
//! Logs go to stderr through `tracing`; this module owns stdout.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use luxe_core::{CartLine, Price, Product, WishlistEntry};
use luxe_storefront::catalog::RemoteUser;
use luxe_storefront::checkout::{OrderConfirmation, OrderSummary, ValidationErrors};
use luxe_storefront::store::ShoppingSession;

fn money(amount: rust_decimal::Decimal) -> String {
    Price::usd(amount).display()
}

/// One product per line: id, title, category, price.
pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found");
        return;
    }
    for product in products {
        println!(
            "{:>4}  {:<50}  {:<18}  {:>10}",
            product.id,
            truncate(&product.title, 50),
            product.category,
            money(product.price)
        );
    }
    println!();
    println!("{} products", products.len());
}

/// Full product page.
pub fn product_detail(product: &Product, in_wishlist: bool, related: &[&Product]) {
    println!("{}", product.title);
    println!("{}", "=".repeat(product.title.chars().count()));
    println!("Price:     {}", money(product.price));
    println!("Category:  {}", product.category);
    if let Some(rating) = &product.rating {
        println!("Rating:    {:.1} ({} reviews)", rating.rate, rating.count);
    }
    println!("Wishlist:  {}", if in_wishlist { "saved" } else { "not saved" });
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
    if !related.is_empty() {
        println!();
        println!("You may also like:");
        for p in related {
            println!("  {:>4}  {}  {}", p.id, p.title, money(p.price));
        }
    }
}

/// Cart lines followed by the order summary.
pub fn cart(lines: &[CartLine], summary: &OrderSummary) {
    if lines.is_empty() {
        println!("Your cart is empty");
        return;
    }
    for line in lines {
        println!(
            "{:>4}  {:<50}  {:>3} x {:>10}  {:>10}",
            line.product_id(),
            truncate(&line.product.title, 50),
            line.quantity,
            money(line.product.price),
            money(line.line_total())
        );
    }
    println!();
    order_summary(summary);
}

/// Subtotal / shipping / tax / total rows.
pub fn order_summary(summary: &OrderSummary) {
    for (label, amount) in summary.lines() {
        println!("{label:<10} {amount:>12}");
    }
    if let Some(remaining) = summary.amount_until_free_shipping() {
        println!("Add {} more for free shipping", money(remaining));
    }
}

/// Saved products.
pub fn wishlist(entries: &[WishlistEntry]) {
    if entries.is_empty() {
        println!("Your wishlist is empty");
        return;
    }
    for entry in entries {
        let product = entry.product();
        println!(
            "{:>4}  {:<50}  {:>10}",
            product.id,
            truncate(&product.title, 50),
            money(product.price)
        );
    }
}

/// Current filter panel settings.
pub fn filters(session: &ShoppingSession, categories: Option<&[String]>) {
    let query = if session.search_query.is_empty() {
        "(none)"
    } else {
        session.search_query.as_str()
    };
    println!("Search:    {query}");
    println!("Category:  {}", session.selected_category);
    println!(
        "Price:     {} - {}",
        money(session.price_range.min()),
        money(session.price_range.max())
    );
    println!("Sort:      {}", session.sort_by.label());
    if let Some(categories) = categories {
        println!("Available: {}", categories.join(", "));
    }
}

/// Profile page.
pub fn profile(session: &ShoppingSession, directory: Option<&RemoteUser>) {
    let Some(user) = &session.user else {
        println!("Not signed in. Run `luxe login -u <username>`.");
        return;
    };
    println!("Username:  {}", user.username);
    if let Some(email) = &user.email {
        println!("Email:     {email}");
    }
    if let Some(remote) = directory {
        if let Some(name) = &remote.name {
            println!("Name:      {}", name.full_name());
        }
        if let Some(phone) = &remote.phone {
            println!("Phone:     {phone}");
        }
        if let Some(address) = &remote.address {
            println!(
                "Address:   {} {}, {} {}",
                address.number, address.street, address.city, address.zipcode
            );
        }
    }
    println!("Cart:      {} items", session.cart_count());
    println!("Wishlist:  {} items", session.wishlist.len());
}

/// Validation messages, one per field.
pub fn validation_errors(errors: &ValidationErrors) {
    for (field, message) in errors {
        eprintln!("  {field}: {message}");
    }
}

/// Completion screen.
pub fn confirmation(confirmation: &OrderConfirmation) {
    println!("Order Placed Successfully!");
    println!("Thank you for your purchase!");
    println!();
    println!("Order:     #{}", confirmation.order_number());
    println!(
        "Placed:    {}",
        confirmation.placed_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("Ship to:   {}", confirmation.ship_to.full_name);
    println!("Payment:   {}", confirmation.payment_method);
    println!("Total:     {}", money(confirmation.summary.total));
}

/// A plain status line.
pub fn line(message: &str) {
    println!("{message}");
}

/// A shopper-facing failure.
pub fn error(message: &str) {
    eprintln!("Error: {message}");
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Backpack", 50), "Backpack");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }
}

//! Cart panel

use leptos::{logging, prelude::*};

use poolside::{
    cart::{Cart, snapshot::CartSnapshot},
    catalog::ItemId,
    checkout::CheckoutSession,
    pricing::format_price,
};

/// UI model for a cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Item the row is for.
    pub item_id: ItemId,

    /// Display name.
    pub name: String,

    /// Units in the cart.
    pub quantity: u32,

    /// Formatted `unit price x quantity`.
    pub line_total: String,
}

/// Rows to render for a cart snapshot, in cart order.
pub fn line_views(snapshot: &CartSnapshot) -> Vec<CartLineView> {
    snapshot
        .lines()
        .iter()
        .map(|line| CartLineView {
            item_id: line.item_id().clone(),
            name: line.display_name().to_string(),
            quantity: line.quantity(),
            line_total: format_price(line.line_total()),
        })
        .collect()
}

#[component]
fn CartRow(line: CartLineView, cart: RwSignal<Cart>) -> impl IntoView {
    let decrease_id = line.item_id.clone();
    let increase_id = line.item_id.clone();
    let remove_id = line.item_id;

    let decrease_label = format!("Decrease {} quantity", line.name);
    let increase_label = format!("Increase {} quantity", line.name);
    let remove_label = format!("Remove {} from cart", line.name);

    view! {
        <li class="cart-line">
            <div class="cart-line-header">
                <p class="cart-line-name">{line.name}</p>
                <span class="cart-line-total">{line.line_total}</span>
            </div>
            <div class="cart-line-controls">
                <button
                    type="button"
                    aria-label=decrease_label
                    class="icon-button icon-button-secondary icon-button-compact"
                    on:click=move |_| cart.update(|cart| cart.adjust_quantity(decrease_id.as_str(), -1))
                >
                    "−"
                </button>
                <span class="cart-line-quantity">{line.quantity}</span>
                <button
                    type="button"
                    aria-label=increase_label
                    class="icon-button icon-button-primary icon-button-compact"
                    on:click=move |_| cart.update(|cart| cart.adjust_quantity(increase_id.as_str(), 1))
                >
                    "+"
                </button>
                <button
                    type="button"
                    aria-label=remove_label
                    class="text-button"
                    on:click=move |_| cart.update(|cart| cart.remove_item(remove_id.as_str()))
                >
                    "Remove"
                </button>
            </div>
        </li>
    }
}

/// Cart contents, total and the checkout entry point.
#[component]
pub fn CartPanel(cart: RwSignal<Cart>, session: RwSignal<CheckoutSession>) -> impl IntoView {
    let snapshot = Memo::new(move |_| {
        cart.with(|cart| cart.snapshot().map_err(|error| error.to_string()))
    });

    view! {
        <section class="panel">
            <div class="panel-header">
                <h2 class="panel-title">"Your Cart"</h2>
            </div>
            {move || match snapshot.get() {
                Ok(snapshot) if snapshot.is_empty() => {
                    view! { <p class="cart-empty">"Your cart is empty."</p> }.into_any()
                }
                Ok(snapshot) => {
                    let total = format_price(snapshot.total());

                    view! {
                        <ul class="cart-lines">
                            {line_views(&snapshot)
                                .into_iter()
                                .map(|line| view! { <CartRow line=line cart=cart /> })
                                .collect_view()}
                        </ul>
                        <p class="cart-total">
                            <span>"Total: "</span>
                            <span class="cart-total-amount">{total}</span>
                        </p>
                    }
                    .into_any()
                }
                Err(error_message) => {
                    view! { <p class="text-sm text-red-700">{error_message}</p> }.into_any()
                }
            }}
            <button
                type="button"
                class="button button-primary"
                disabled=move || !cart.with(|cart| session.with(|session| session.can_open(cart)))
                on:click=move |_| {
                    cart.with_untracked(|cart| {
                        session.update(|session| {
                            if let Err(error) = session.open(cart) {
                                logging::warn!("{error}");
                            }
                        });
                    });
                }
            >
                "Pay Now"
            </button>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use poolside::catalog::Catalog;

    use super::*;

    #[test]
    fn line_views_format_line_totals() -> TestResult {
        let catalog = Arc::new(Catalog::team_store()?);
        let mut cart = Cart::new(Arc::clone(&catalog));

        cart.add_item(catalog.item("Goggles")?);
        cart.add_item(catalog.item("Team Cap")?);
        cart.adjust_quantity("Goggles", 1);

        let views = line_views(&cart.snapshot()?);

        assert_eq!(
            views,
            [
                CartLineView {
                    item_id: ItemId::new("Goggles"),
                    name: "Goggles".to_string(),
                    quantity: 2,
                    line_total: "$36.00".to_string(),
                },
                CartLineView {
                    item_id: ItemId::new("Team Cap"),
                    name: "Team Cap".to_string(),
                    quantity: 1,
                    line_total: "$12.00".to_string(),
                },
            ]
        );

        Ok(())
    }

    #[test]
    fn line_views_empty_for_empty_cart() -> TestResult {
        let cart = Cart::new(Arc::new(Catalog::team_store()?));

        assert!(line_views(&cart.snapshot()?).is_empty());

        Ok(())
    }
}

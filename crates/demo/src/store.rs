//! Merchandise grid

use std::sync::Arc;

use leptos::prelude::*;
use rusty_money::{Money, iso::Currency};

use poolside::{
    cart::Cart,
    catalog::{Catalog, CatalogItem},
    pricing::format_price,
};

/// Label for an item's add button, depending on whether it is already in the cart.
pub fn add_button_label(quantity_in_cart: u32) -> &'static str {
    if quantity_in_cart == 0 {
        "Add to Cart"
    } else {
        "Add More"
    }
}

/// Unit price as shown on a store card.
pub fn price_label(unit_price: &Money<'_, Currency>) -> String {
    format_price(unit_price)
}

#[component]
fn StoreItemCard(item: CatalogItem, cart: RwSignal<Cart>) -> impl IntoView {
    let item_id = item.id().clone();
    let label_id = item_id.clone();
    let price = price_label(item.unit_price());
    let aria_label = format!("Add {} ({price}) to cart", item.display_name());
    let alt_text = item.display_name().to_string();

    view! {
        <li class="store-item">
            <img class="store-item-image" src=item.image_ref().to_string() alt=alt_text />
            <div class="store-item-body">
                <p class="store-item-name">{item.display_name().to_string()}</p>
                <p class="store-item-price">{price}</p>
            </div>
            <button
                type="button"
                aria-label=aria_label
                class="icon-button icon-button-primary"
                on:click=move |_| {
                    cart.update(|cart| {
                        if let Some(item) = cart.catalog().get(item_id.as_str()).cloned() {
                            cart.add_item(&item);
                        }
                    });
                }
            >
                {move || add_button_label(cart.with(|cart| cart.quantity_of(label_id.as_str())))}
            </button>
        </li>
    }
}

/// Grid of purchasable items.
#[component]
pub fn StorePanel(catalog: Arc<Catalog>, cart: RwSignal<Cart>) -> impl IntoView {
    view! {
        <section class="panel">
            <div class="panel-header">
                <h2 class="panel-title">"Merchandise"</h2>
            </div>
            <ul class="store-grid">
                {catalog
                    .iter()
                    .cloned()
                    .map(|item| view! { <StoreItemCard item=item cart=cart /> })
                    .collect_view()}
            </ul>
        </section>
    }
}

//! Leptos Poolside Team Store Demo

use std::sync::Arc;

use leptos::prelude::*;

use poolside::{
    cart::{Cart, observer::CartEvent},
    catalog::Catalog,
    checkout::CheckoutSession,
    config::StoreConfig,
};

mod cart;
mod checkout;
mod forms;
mod store;

const STORE_CONFIG_YAML: &str = include_str!("../../../fixtures/store.yml");

/// Parsed application fixtures used by the UI.
#[derive(Debug)]
struct AppData {
    /// Team store merchandise.
    catalog: Arc<Catalog>,

    /// Store settings.
    config: StoreConfig,
}

impl AppData {
    fn load() -> Result<Self, String> {
        let config = StoreConfig::from_yaml(STORE_CONFIG_YAML)
            .map_err(|error| format!("Failed to load store config: {error}"))?;

        let catalog = Catalog::team_store()
            .map_err(|error| format!("Failed to load team store catalog: {error}"))?;

        Ok(Self {
            catalog: Arc::new(catalog),
            config,
        })
    }
}

/// Main demo app shell.
#[component]
fn App() -> impl IntoView {
    match AppData::load() {
        Ok(app_data) => {
            let live_message = RwSignal::new((0_u64, String::new()));

            let mut cart = Cart::new(Arc::clone(&app_data.catalog));
            let announce_catalog = Arc::clone(&app_data.catalog);

            cart.subscribe(move |event: &CartEvent| {
                announce(live_message, describe_cart_event(&announce_catalog, event));
            });

            let cart = RwSignal::new(cart);
            let session = RwSignal::new(CheckoutSession::from_config(&app_data.config));

            view! {
                <main class="min-h-screen bg-sky-50 px-4 py-6 text-slate-900">
                    <p class="sr-only" role="status" aria-live="polite" aria-atomic="true">
                        {move || live_message.get().1}
                    </p>
                    <div class="mx-auto mb-6 max-w-5xl">
                        <h1 class="text-2xl font-semibold tracking-tight">"Team Store"</h1>
                    </div>
                    <div class="mx-auto grid max-w-5xl grid-cols-1 gap-6 md:grid-cols-3">
                        <div class="md:col-span-2">
                            <store::StorePanel catalog=Arc::clone(&app_data.catalog) cart=cart />
                        </div>
                        <cart::CartPanel cart=cart session=session />
                    </div>
                    <div class="mx-auto mt-6 grid max-w-5xl grid-cols-1 gap-6 md:grid-cols-2">
                        <forms::RegistrationPanel />
                        <forms::TryoutPanel />
                    </div>
                    <checkout::CheckoutModal cart=cart session=session live_message=live_message />
                </main>
            }
            .into_any()
        }
        Err(error_message) => view! {
            <main class="min-h-screen bg-sky-50 px-4 py-6 text-slate-900">
                <div class="mx-auto mb-6 max-w-5xl">
                    <h1 class="text-2xl font-semibold tracking-tight">"Team Store"</h1>
                </div>
                <div class="mx-auto max-w-3xl rounded-lg border border-red-200 bg-red-50 p-4">
                    <p class="text-sm text-red-700">{error_message}</p>
                </div>
            </main>
        }
        .into_any(),
    }
}

/// Main server function
fn main() {
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(App);
}

fn announce(live_message: RwSignal<(u64, String)>, message: String) {
    live_message.update(|(id, text)| {
        *id = id.saturating_add(1);
        *text = message;
    });
}

fn describe_cart_event(catalog: &Catalog, event: &CartEvent) -> String {
    let name = |item_id: &poolside::catalog::ItemId| {
        catalog
            .get(item_id.as_str())
            .map_or_else(|| item_id.to_string(), |item| item.display_name().to_string())
    };

    match event {
        CartEvent::Added { item_id } => format!("Added {} to cart.", name(item_id)),
        CartEvent::QuantityChanged { item_id, quantity } => {
            format!("{} quantity is now {quantity}.", name(item_id))
        }
        CartEvent::Removed { item_id } => format!("Removed {} from cart.", name(item_id)),
        CartEvent::Cleared => "Cart emptied.".to_string(),
    }
}

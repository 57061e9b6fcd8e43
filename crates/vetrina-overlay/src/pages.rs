//! Storefront page glue: typed replacements for the legacy global openers.
//!
//! The original pages exposed one global open function per dialog
//! (`openEditDealerPopup`, `openDiscountPopup`, ...) that scraped values
//! out of nearby markup before showing the popup. Here each opener takes
//! a typed source struct, prefills the popup's form, sets its submit
//! action, and delegates to [`PopupRegistry::open`].
//!
//! All openers are fire-and-forget from the caller's perspective: a
//! missing popup is logged and reported as `false`, never a panic.

use vetrina_core::FocusId;

use crate::form::FormModel;
use crate::popup::{
    OpenOptions, PopupBuilder, PopupConfig, PopupId, PopupKind, PopupRegistry,
};

/// Canonical popup names, matching the markup ids the pages use.
pub mod names {
    pub const EDIT_PRODUCT: &str = "editProductPopup";
    pub const EDIT_DEALER: &str = "editDealerPopup";
    pub const ADD_SUBSCRIPTION: &str = "addSubscriptionPopup";
    pub const EDIT_SUBSCRIPTION: &str = "editSubscriptionPopup";
    pub const DISCOUNT: &str = "discountPopup";
    pub const FILTER: &str = "filterPopup";
    pub const ACCOUNT_EDIT: &str = "editAccountModal";
    pub const ACCOUNT_DELETE: &str = "deleteAccountModal";
    pub const CAR_DETAILS: &str = "carDetailsPopup";
}

/// Ids of the standard storefront popup set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorefrontPopups {
    pub edit_product: PopupId,
    pub edit_dealer: PopupId,
    pub add_subscription: PopupId,
    pub edit_subscription: PopupId,
    pub discount: PopupId,
    pub filter: PopupId,
    pub account_edit: PopupId,
    pub account_delete: PopupId,
    pub car_details: PopupId,
}

/// Product data carried on the maintenance page's edit buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDetails {
    pub id: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub mileage: Option<String>,
    pub year: Option<String>,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
}

/// Dealer data carried on the maintenance page's edit buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealerDetails {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Subscription data carried on the admin page's buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionDetails {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub discount: Option<String>,
    pub expiry: Option<String>,
    pub duration: Option<String>,
    pub max_cars: Option<String>,
}

fn focus_range(base: FocusId, count: usize) -> Vec<FocusId> {
    (0..count as FocusId).map(|i| base + i).collect()
}

/// Register the standard storefront popup set.
///
/// This is the explicit-registration replacement for scanning the page:
/// the code that renders the dialogs calls it once. Safe to call again;
/// registration is idempotent by name.
pub fn register_storefront_popups(registry: &mut PopupRegistry) -> StorefrontPopups {
    let edit_product = registry.register(
        PopupBuilder::new(names::EDIT_PRODUCT)
            .form(
                FormModel::new()
                    .field("description", "")
                    .field("price", "")
                    .field("category", "")
                    .field("brand", "")
                    .field("model", "")
                    .field("mileage", "")
                    .field("year", "")
                    .field("fuelType", "")
                    .field("transmission", ""),
            )
            // Nine inputs plus the save and cancel buttons.
            .focusables(focus_range(100, 11)),
    );

    let edit_dealer = registry.register(
        PopupBuilder::new(names::EDIT_DEALER)
            .form(
                FormModel::new()
                    .field("name", "")
                    .field("description", "")
                    .field("address", "")
                    .field("email", "")
                    .field("phone", ""),
            )
            .focusables(focus_range(200, 7)),
    );

    let add_subscription = registry.register(
        PopupBuilder::new(names::ADD_SUBSCRIPTION)
            .form(subscription_form())
            .focusables(focus_range(300, 7)),
    );

    let edit_subscription = registry.register(
        PopupBuilder::new(names::EDIT_SUBSCRIPTION)
            .form(subscription_form())
            .focusables(focus_range(400, 7)),
    );

    let discount = registry.register(
        PopupBuilder::new(names::DISCOUNT)
            .form(
                FormModel::new()
                    .field("subscriptionName", "Abbonamento")
                    .field("discount", "")
                    .field("discountExpiry", ""),
            )
            .focusables(focus_range(500, 4)),
    );

    let filter = registry.register(
        PopupBuilder::new(names::FILTER)
            .config(PopupConfig::default().kind(PopupKind::Filter))
            .form(
                FormModel::new()
                    .field("category", "")
                    .field("brand", "")
                    .field("priceMin", "")
                    .field("priceMax", ""),
            )
            .focusables(focus_range(600, 6)),
    );

    let account_edit = registry.register(
        PopupBuilder::new(names::ACCOUNT_EDIT)
            .form(
                FormModel::new()
                    .field("firstName", "")
                    .field("lastName", "")
                    .field("birthDate", "")
                    .field("address", "")
                    .field("phoneNumber", "")
                    .field("additionalInfo", ""),
            )
            .focusables(focus_range(700, 8)),
    );

    let account_delete = registry.register(
        PopupBuilder::new(names::ACCOUNT_DELETE)
            // Confirm and cancel buttons only.
            .focusables(focus_range(800, 2)),
    );

    let car_details = registry.register(
        PopupBuilder::new(names::CAR_DETAILS)
            .config(PopupConfig::default().kind(PopupKind::CarDetails))
            // Prev, next, close. The carousel is installed per open.
            .focusables(focus_range(900, 3)),
    );

    StorefrontPopups {
        edit_product,
        edit_dealer,
        add_subscription,
        edit_subscription,
        discount,
        filter,
        account_edit,
        account_delete,
        car_details,
    }
}

fn subscription_form() -> FormModel {
    FormModel::new()
        .field("name", "")
        .field("description", "")
        .field("price", "")
        .field("durationDays", "")
        .field("maxCars", "")
}

/// Whether a scraped value is worth copying into a form field.
///
/// Placeholder strings the pages render for missing data are skipped,
/// as are empty and whitespace-only values.
pub fn should_populate(value: &str) -> bool {
    const PLACEHOLDERS: [&str; 4] = [
        "Nome Concessionario",
        "Nessuna descrizione",
        "non disponibile",
        "N/A",
    ];
    !value.trim().is_empty() && !PLACEHOLDERS.iter().any(|p| value.contains(p))
}

fn populate(form: &mut FormModel, values: &[(&str, Option<&str>)]) {
    for (field, value) in values {
        match value {
            Some(v) if should_populate(v) => {
                if let Err(err) = form.set(field, *v) {
                    tracing::warn!(%err, field, "prefill skipped");
                }
            }
            _ => tracing::debug!(field, "prefill skipped: empty or placeholder value"),
        }
    }
}

/// Open the product editor prefilled from `product`.
pub fn open_edit_product(registry: &mut PopupRegistry, product: &ProductDetails) -> bool {
    let Some(id) = registry.id_of(names::EDIT_PRODUCT) else {
        tracing::error!(name = names::EDIT_PRODUCT, "popup not registered");
        return false;
    };
    if let Some(record) = registry.get_mut(id) {
        let form = record.form_mut();
        populate(
            form,
            &[
                ("description", product.description.as_deref()),
                ("price", product.price.as_deref()),
                ("category", product.category.as_deref()),
                ("brand", product.brand.as_deref()),
                ("model", product.model.as_deref()),
                ("mileage", product.mileage.as_deref()),
                ("year", product.year.as_deref()),
                ("fuelType", product.fuel.as_deref()),
                ("transmission", product.transmission.as_deref()),
            ],
        );
        if let Some(product_id) = &product.id {
            form.set_action(format!("/admin/product/{product_id}/edit"));
        }
    }
    registry.open(id, OpenOptions::default()).is_ok()
}

/// Open the dealer editor prefilled from `dealer`.
pub fn open_edit_dealer(registry: &mut PopupRegistry, dealer: &DealerDetails) -> bool {
    let Some(id) = registry.id_of(names::EDIT_DEALER) else {
        tracing::error!(name = names::EDIT_DEALER, "popup not registered");
        return false;
    };
    if let Some(record) = registry.get_mut(id) {
        let form = record.form_mut();
        populate(
            form,
            &[
                ("name", dealer.name.as_deref()),
                ("description", dealer.description.as_deref()),
                ("address", dealer.address.as_deref()),
                ("email", dealer.email.as_deref()),
                ("phone", dealer.phone.as_deref()),
            ],
        );
        if let Some(dealer_id) = &dealer.id {
            form.set_action(format!("/admin/dealer/{dealer_id}/edit"));
        }
    }
    registry.open(id, OpenOptions::default()).is_ok()
}

/// Open the add-subscription dialog with a clean form.
pub fn open_add_subscription(registry: &mut PopupRegistry) -> bool {
    let Some(id) = registry.id_of(names::ADD_SUBSCRIPTION) else {
        tracing::error!(name = names::ADD_SUBSCRIPTION, "popup not registered");
        return false;
    };
    if let Some(record) = registry.get_mut(id) {
        record.form_mut().reset();
    }
    registry.open(id, OpenOptions::default()).is_ok()
}

/// Open the subscription editor prefilled from `subscription`.
pub fn open_edit_subscription(
    registry: &mut PopupRegistry,
    subscription: &SubscriptionDetails,
) -> bool {
    let Some(id) = registry.id_of(names::EDIT_SUBSCRIPTION) else {
        tracing::error!(name = names::EDIT_SUBSCRIPTION, "popup not registered");
        return false;
    };
    if let Some(record) = registry.get_mut(id) {
        let form = record.form_mut();
        populate(
            form,
            &[
                ("name", subscription.name.as_deref()),
                ("description", subscription.description.as_deref()),
                ("price", subscription.price.as_deref()),
                ("durationDays", subscription.duration.as_deref()),
                ("maxCars", subscription.max_cars.as_deref()),
            ],
        );
        if let Some(subscription_id) = &subscription.id {
            form.set_action(format!("/admin/subscription/{subscription_id}/edit"));
        }
    }
    registry.open(id, OpenOptions::default()).is_ok()
}

/// Open the discount dialog for a subscription.
///
/// The form starts clean, the subscription name falls back to a generic
/// label when missing, and `today` (ISO date) becomes the minimum
/// accepted expiry.
pub fn open_discount(
    registry: &mut PopupRegistry,
    subscription: &SubscriptionDetails,
    today: &str,
) -> bool {
    let Some(id) = registry.id_of(names::DISCOUNT) else {
        tracing::error!(name = names::DISCOUNT, "popup not registered");
        return false;
    };
    if let Some(record) = registry.get_mut(id) {
        let form = record.form_mut();
        form.reset();
        if let Some(name) = subscription.name.as_deref()
            && should_populate(name)
            && let Err(err) = form.set("subscriptionName", name)
        {
            tracing::warn!(%err, "prefill skipped");
        }
        if let Err(err) = form.set_min("discountExpiry", today) {
            tracing::warn!(%err, "expiry minimum not applied");
        }
        if let Some(subscription_id) = &subscription.id {
            form.set_action(format!("/admin/subscription/{subscription_id}/apply-discount"));
        }
    }
    registry.open(id, OpenOptions::default()).is_ok()
}

/// Open the search-filters popup.
pub fn open_filter(registry: &mut PopupRegistry) -> bool {
    registry.open_by_name(names::FILTER)
}

/// Close the search-filters popup.
pub fn close_filter(registry: &mut PopupRegistry) -> bool {
    registry.close_by_name(names::FILTER)
}

/// Open the account editor.
pub fn open_account_edit(registry: &mut PopupRegistry) -> bool {
    registry.open_by_name(names::ACCOUNT_EDIT)
}

/// Open the account deletion confirmation.
pub fn open_account_delete(registry: &mut PopupRegistry) -> bool {
    registry.open_by_name(names::ACCOUNT_DELETE)
}

/// Open the car-details popup with a carousel over `image_count` images.
pub fn open_car_details(registry: &mut PopupRegistry, image_count: usize) -> bool {
    let Some(id) = registry.id_of(names::CAR_DETAILS) else {
        tracing::error!(name = names::CAR_DETAILS, "popup not registered");
        return false;
    };
    if let Some(record) = registry.get_mut(id) {
        record.set_carousel(image_count);
    }
    registry.open(id, OpenOptions::default()).is_ok()
}

//! Builtin platform configurations
//!
//! Default catalog entries for the four supported marketplaces. Field
//! names and endpoint shapes follow each platform's public merchant API;
//! deployments with divergent contracts override these via a catalog file.

use super::{
    AuthConfig, AuthScheme, Endpoints, MenuSchema, MenuShape, MoneyUnit, OrderSchema,
    PlatformConfig, SignatureScheme, StatusEntry, WebhookConfig, WebhookEventEntry,
};
use rust_decimal::Decimal;
use shared::Platform;
use shared::models::order::OrderStatus;
use shared::models::webhook::WebhookEventType;

pub(super) fn config_for(platform: Platform) -> PlatformConfig {
    match platform {
        Platform::IFood => ifood(),
        Platform::Rappi => rappi(),
        Platform::UberEats => ubereats(),
        Platform::NineNineFood => nine_nine_food(),
    }
}

fn statuses(table: &[(OrderStatus, &str)]) -> Vec<StatusEntry> {
    table
        .iter()
        .map(|(canonical, native)| StatusEntry {
            canonical: *canonical,
            native: native.to_string(),
        })
        .collect()
}

fn events(table: &[(&str, WebhookEventType)]) -> Vec<WebhookEventEntry> {
    table
        .iter()
        .map(|(native, canonical)| WebhookEventEntry {
            native: native.to_string(),
            canonical: *canonical,
        })
        .collect()
}

fn ifood() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::IFood,
        base_url: "https://merchant-api.ifood.com.br".to_string(),
        auth: AuthConfig {
            endpoint: "/authentication/v1.0/oauth/token".to_string(),
            scheme: AuthScheme::OauthClientCredentials,
        },
        timeout_secs: 30,
        commission_rate: Decimal::new(2300, 2), // 23.00%
        required_credentials: vec![
            "client_id".to_string(),
            "client_secret".to_string(),
            "merchant_id".to_string(),
        ],
        money_unit: MoneyUnit::Decimal,
        endpoints: Endpoints {
            merchant: "/merchant/v1.0/merchants/{merchant_id}".to_string(),
            categories: Some("/catalog/v2.0/merchants/{merchant_id}/categories".to_string()),
            products: Some("/catalog/v2.0/merchants/{merchant_id}/products".to_string()),
            menu_upload: None,
            orders: "/order/v1.0/orders".to_string(),
            order_status: "/order/v1.0/orders/{order_id}/statuses".to_string(),
            status_param: "status".to_string(),
            from_param: "createdAfter".to_string(),
            to_param: "createdBefore".to_string(),
            orders_list_field: String::new(), // root array
        },
        statuses: statuses(&[
            (OrderStatus::Pending, "PLACED"),
            (OrderStatus::Confirmed, "CONFIRMED"),
            (OrderStatus::Preparing, "PREPARATION_STARTED"),
            (OrderStatus::Ready, "READY_TO_PICKUP"),
            (OrderStatus::Dispatched, "DISPATCHED"),
            (OrderStatus::Delivered, "CONCLUDED"),
            (OrderStatus::Cancelled, "CANCELLED"),
        ]),
        webhook: WebhookConfig {
            signature: SignatureScheme::HmacSha256,
            event_field: "code".to_string(),
            order_field: "order".to_string(),
            timestamp_field: "createdAt".to_string(),
            events: events(&[
                ("PLACED", WebhookEventType::OrderCreated),
                ("CONFIRMED", WebhookEventType::OrderConfirmed),
                ("CANCELLED", WebhookEventType::OrderCancelled),
                ("DISPATCHED", WebhookEventType::OrderDispatched),
                ("CONCLUDED", WebhookEventType::OrderDelivered),
            ]),
        },
        menu_schema: MenuSchema {
            shape: MenuShape::Nested,
            categories_field: "categories".to_string(),
            products_field: "items".to_string(),
            id_field: "externalCode".to_string(),
            name_field: "name".to_string(),
            description_field: "description".to_string(),
            price_field: "price".to_string(),
            available_field: "available".to_string(),
            category_ref_field: "categoryExternalCode".to_string(),
            sort_order_field: "index".to_string(),
        },
        order_schema: OrderSchema {
            id: "id".to_string(),
            order_number: "displayId".to_string(),
            status: "status".to_string(),
            customer_name: "customer.name".to_string(),
            customer_phone: "customer.phone.number".to_string(),
            customer_email: "customer.email".to_string(),
            delivery_address: "delivery.deliveryAddress.formattedAddress".to_string(),
            delivery_fee: "total.deliveryFee".to_string(),
            estimated_time: "delivery.deliveryDateTime".to_string(),
            driver_name: "delivery.courier.name".to_string(),
            driver_phone: "delivery.courier.phone".to_string(),
            items: "items".to_string(),
            item_name: "name".to_string(),
            item_quantity: "quantity".to_string(),
            item_unit_price: "unitPrice".to_string(),
            item_total: "totalPrice".to_string(),
            item_notes: "observations".to_string(),
            item_options: "options".to_string(),
            option_name: "name".to_string(),
            option_price: "price".to_string(),
            subtotal: "total.subTotal".to_string(),
            service_fee: "total.additionalFees".to_string(),
            discount: "total.benefits".to_string(),
            total: "total.orderAmount".to_string(),
            payment_method: "payments.methods.0.method".to_string(),
            payment_status: "payments.methods.0.type".to_string(),
            notes: "extraInfo".to_string(),
            created_at: "createdAt".to_string(),
        },
    }
}

fn rappi() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::Rappi,
        base_url: "https://services.rappi.com.br".to_string(),
        auth: AuthConfig {
            endpoint: "/api/open-api/login".to_string(),
            scheme: AuthScheme::OauthClientCredentials,
        },
        timeout_secs: 30,
        commission_rate: Decimal::new(1800, 2), // 18.00%
        required_credentials: vec![
            "client_id".to_string(),
            "client_secret".to_string(),
            "store_id".to_string(),
        ],
        money_unit: MoneyUnit::Decimal,
        endpoints: Endpoints {
            merchant: "/api/v2/restaurants/{store_id}".to_string(),
            categories: Some("/api/v2/restaurants/{store_id}/menu/categories".to_string()),
            products: Some("/api/v2/restaurants/{store_id}/menu/products".to_string()),
            menu_upload: None,
            orders: "/api/v2/restaurants/{store_id}/orders".to_string(),
            order_status: "/api/v2/orders/{order_id}/status".to_string(),
            status_param: "state".to_string(),
            from_param: "date_from".to_string(),
            to_param: "date_to".to_string(),
            orders_list_field: "orders".to_string(),
        },
        statuses: statuses(&[
            (OrderStatus::Pending, "CREATED"),
            (OrderStatus::Confirmed, "ACCEPTED"),
            (OrderStatus::Preparing, "IN_PREPARATION"),
            (OrderStatus::Ready, "READY_FOR_PICKUP"),
            (OrderStatus::Dispatched, "ON_ROUTE"),
            (OrderStatus::Delivered, "DELIVERED"),
            (OrderStatus::Cancelled, "CANCELED"),
        ]),
        webhook: WebhookConfig {
            // Rappi authenticates webhook endpoints at the network level;
            // deliveries themselves are unsigned.
            signature: SignatureScheme::None,
            event_field: "event".to_string(),
            order_field: "order".to_string(),
            timestamp_field: "sent_at".to_string(),
            events: events(&[
                ("NEW_ORDER", WebhookEventType::OrderCreated),
                ("ORDER_TAKEN", WebhookEventType::OrderConfirmed),
                ("ORDER_CANCELLED", WebhookEventType::OrderCancelled),
                ("ORDER_ON_ROUTE", WebhookEventType::OrderDispatched),
                ("ORDER_DELIVERED", WebhookEventType::OrderDelivered),
                ("PAYMENT_CONFIRMED", WebhookEventType::PaymentConfirmed),
            ]),
        },
        menu_schema: MenuSchema {
            shape: MenuShape::Nested,
            categories_field: "categories".to_string(),
            products_field: "products".to_string(),
            id_field: "id".to_string(),
            name_field: "name".to_string(),
            description_field: "description".to_string(),
            price_field: "price".to_string(),
            available_field: "is_available".to_string(),
            category_ref_field: "category_id".to_string(),
            sort_order_field: "sort_order".to_string(),
        },
        order_schema: OrderSchema {
            id: "id".to_string(),
            order_number: "reference".to_string(),
            status: "state".to_string(),
            customer_name: "client.name".to_string(),
            customer_phone: "client.phone".to_string(),
            customer_email: "client.email".to_string(),
            delivery_address: "delivery_information.address".to_string(),
            delivery_fee: "totals.shipping".to_string(),
            estimated_time: "delivery_information.eta".to_string(),
            driver_name: "courier.name".to_string(),
            driver_phone: "courier.phone".to_string(),
            items: "items".to_string(),
            item_name: "name".to_string(),
            item_quantity: "units".to_string(),
            item_unit_price: "unit_price".to_string(),
            item_total: "total_price".to_string(),
            item_notes: "comments".to_string(),
            item_options: "toppings".to_string(),
            option_name: "description".to_string(),
            option_price: "price".to_string(),
            subtotal: "totals.subtotal".to_string(),
            service_fee: "totals.service_fee".to_string(),
            discount: "totals.discount".to_string(),
            total: "totals.total".to_string(),
            payment_method: "payment.method".to_string(),
            payment_status: "payment.status".to_string(),
            notes: "notes".to_string(),
            created_at: "created_at".to_string(),
        },
    }
}

fn ubereats() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::UberEats,
        base_url: "https://api.uber.com".to_string(),
        auth: AuthConfig {
            // Token endpoint lives on a separate host
            endpoint: "https://auth.uber.com/oauth/v2/token".to_string(),
            scheme: AuthScheme::OauthClientCredentials,
        },
        timeout_secs: 30,
        commission_rate: Decimal::new(3000, 2), // 30.00%
        required_credentials: vec![
            "client_id".to_string(),
            "client_secret".to_string(),
            "store_id".to_string(),
        ],
        money_unit: MoneyUnit::Cents,
        endpoints: Endpoints {
            merchant: "/v1/eats/stores/{store_id}".to_string(),
            categories: None,
            products: None,
            // Uber takes the whole menu as one document
            menu_upload: Some("/v2/eats/stores/{store_id}/menus".to_string()),
            orders: "/v1/eats/stores/{store_id}/orders".to_string(),
            order_status: "/v1/eats/orders/{order_id}/status".to_string(),
            status_param: "state".to_string(),
            from_param: "start_time".to_string(),
            to_param: "end_time".to_string(),
            orders_list_field: "orders".to_string(),
        },
        statuses: statuses(&[
            (OrderStatus::Pending, "created"),
            (OrderStatus::Confirmed, "accepted"),
            (OrderStatus::Preparing, "in_progress"),
            (OrderStatus::Ready, "ready_for_pickup"),
            (OrderStatus::Dispatched, "dispatched"),
            (OrderStatus::Delivered, "delivered"),
            (OrderStatus::Cancelled, "canceled"),
        ]),
        webhook: WebhookConfig {
            signature: SignatureScheme::HmacSha256,
            event_field: "event_type".to_string(),
            order_field: "data".to_string(),
            timestamp_field: "event_time".to_string(),
            events: events(&[
                ("orders.notification", WebhookEventType::OrderCreated),
                ("orders.accepted", WebhookEventType::OrderConfirmed),
                ("orders.cancel", WebhookEventType::OrderCancelled),
                ("orders.dispatch", WebhookEventType::OrderDispatched),
                ("orders.delivered", WebhookEventType::OrderDelivered),
            ]),
        },
        menu_schema: MenuSchema {
            shape: MenuShape::Parallel,
            categories_field: "categories".to_string(),
            products_field: "items".to_string(),
            id_field: "id".to_string(),
            name_field: "title".to_string(),
            description_field: "description".to_string(),
            price_field: "price".to_string(),
            available_field: "available".to_string(),
            category_ref_field: "category_id".to_string(),
            sort_order_field: "display_order".to_string(),
        },
        order_schema: OrderSchema {
            id: "id".to_string(),
            order_number: "display_id".to_string(),
            status: "current_state".to_string(),
            customer_name: "eater.name".to_string(),
            customer_phone: "eater.phone".to_string(),
            customer_email: "eater.email".to_string(),
            delivery_address: "delivery.location.address".to_string(),
            delivery_fee: "payment.charges.delivery_fee.amount".to_string(),
            estimated_time: "estimated_ready_for_pickup_at".to_string(),
            driver_name: "courier.name".to_string(),
            driver_phone: "courier.phone".to_string(),
            items: "cart.items".to_string(),
            item_name: "title".to_string(),
            item_quantity: "quantity".to_string(),
            item_unit_price: "price.unit_price.amount".to_string(),
            item_total: "price.total_price.amount".to_string(),
            item_notes: "special_instructions".to_string(),
            item_options: "selected_modifier_groups".to_string(),
            option_name: "title".to_string(),
            option_price: "price.amount".to_string(),
            subtotal: "payment.charges.sub_total.amount".to_string(),
            service_fee: "payment.charges.service_fee.amount".to_string(),
            discount: "payment.charges.discount.amount".to_string(),
            total: "payment.charges.total.amount".to_string(),
            payment_method: "payment.method".to_string(),
            payment_status: "payment.status".to_string(),
            notes: "special_instructions".to_string(),
            created_at: "placed_at".to_string(),
        },
    }
}

fn nine_nine_food() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::NineNineFood,
        base_url: "https://api.food.99app.com".to_string(),
        auth: AuthConfig {
            endpoint: "/v1/auth/login".to_string(),
            scheme: AuthScheme::PasswordLogin,
        },
        timeout_secs: 30,
        commission_rate: Decimal::new(999, 2), // 9.99%
        required_credentials: vec![
            "api_key".to_string(),
            "email".to_string(),
            "password".to_string(),
            "store_id".to_string(),
        ],
        money_unit: MoneyUnit::Cents,
        endpoints: Endpoints {
            merchant: "/v1/stores/{store_id}".to_string(),
            categories: Some("/v1/stores/{store_id}/categories".to_string()),
            products: Some("/v1/stores/{store_id}/products".to_string()),
            menu_upload: None,
            orders: "/v1/stores/{store_id}/orders".to_string(),
            order_status: "/v1/orders/{order_id}/status".to_string(),
            status_param: "status".to_string(),
            from_param: "from".to_string(),
            to_param: "to".to_string(),
            orders_list_field: "data".to_string(),
        },
        statuses: statuses(&[
            (OrderStatus::Pending, "pending"),
            (OrderStatus::Confirmed, "accepted"),
            (OrderStatus::Preparing, "preparing"),
            (OrderStatus::Ready, "ready"),
            (OrderStatus::Dispatched, "delivering"),
            (OrderStatus::Delivered, "delivered"),
            (OrderStatus::Cancelled, "cancelled"),
        ]),
        webhook: WebhookConfig {
            signature: SignatureScheme::HmacSha256,
            event_field: "event_type".to_string(),
            order_field: "data".to_string(),
            timestamp_field: "timestamp".to_string(),
            events: events(&[
                ("order.created", WebhookEventType::OrderCreated),
                ("order.confirmed", WebhookEventType::OrderConfirmed),
                ("order.cancelled", WebhookEventType::OrderCancelled),
                ("order.dispatched", WebhookEventType::OrderDispatched),
                ("order.delivered", WebhookEventType::OrderDelivered),
                ("payment.confirmed", WebhookEventType::PaymentConfirmed),
            ]),
        },
        menu_schema: MenuSchema {
            shape: MenuShape::Parallel,
            categories_field: "categories".to_string(),
            products_field: "products".to_string(),
            id_field: "id".to_string(),
            name_field: "name".to_string(),
            description_field: "description".to_string(),
            price_field: "price".to_string(),
            available_field: "active".to_string(),
            category_ref_field: "category_id".to_string(),
            sort_order_field: "position".to_string(),
        },
        order_schema: OrderSchema {
            id: "id".to_string(),
            order_number: "number".to_string(),
            status: "status".to_string(),
            customer_name: "customer.name".to_string(),
            customer_phone: "customer.phone".to_string(),
            customer_email: "customer.email".to_string(),
            delivery_address: "delivery.address".to_string(),
            delivery_fee: "delivery_fee".to_string(),
            estimated_time: "delivery.eta".to_string(),
            driver_name: "delivery.driver.name".to_string(),
            driver_phone: "delivery.driver.phone".to_string(),
            items: "items".to_string(),
            item_name: "name".to_string(),
            item_quantity: "quantity".to_string(),
            item_unit_price: "price".to_string(),
            item_total: "total".to_string(),
            item_notes: "note".to_string(),
            item_options: "extras".to_string(),
            option_name: "name".to_string(),
            option_price: "price".to_string(),
            subtotal: "subtotal".to_string(),
            service_fee: "service_fee".to_string(),
            discount: "discount".to_string(),
            total: "total".to_string(),
            payment_method: "payment.method".to_string(),
            payment_status: "payment.status".to_string(),
            notes: "notes".to_string(),
            created_at: "created_at".to_string(),
        },
    }
}

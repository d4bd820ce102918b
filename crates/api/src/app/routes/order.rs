//! `/api/order` — order listing, lookup and creation.

use async_trait::async_trait;

use cart_core::{OrderId, OrderModel, PageRequest};

use crate::dispatch::{DispatchError, Handler, HandlerOutput, RouteHandler, RouteRequest};
use crate::routing::{Operation, ResourceGroup};

pub const RESOURCE: &str = "order";

pub const ROUTES: ResourceGroup = ResourceGroup {
    name: RESOURCE,
    template: "/api/order",
    operations: &[
        Operation::get("list_orders"),
        Operation::get("get_order_by_id").at("{orderId}"),
        Operation::post("create_order"),
    ],
};

pub fn handlers() -> [(&'static str, Handler); 3] {
    [
        ("list_orders", Handler::bound(ListOrders)),
        ("get_order_by_id", Handler::bound(GetOrderById)),
        ("create_order", Handler::bound(CreateOrder)),
    ]
}

pub struct ListOrders;

#[async_trait]
impl RouteHandler for ListOrders {
    async fn handle(&self, request: RouteRequest) -> Result<HandlerOutput, DispatchError> {
        let page: PageRequest = request.query()?;
        tracing::debug!(offset = page.offset, page_size = page.page_size, "list orders");
        Err(DispatchError::not_implemented(&request.entry))
    }
}

pub struct GetOrderById;

#[async_trait]
impl RouteHandler for GetOrderById {
    async fn handle(&self, request: RouteRequest) -> Result<HandlerOutput, DispatchError> {
        let order_id: OrderId = request.param("orderId")?.parse()?;
        tracing::debug!(%order_id, "get order");
        Err(DispatchError::not_implemented(&request.entry))
    }
}

pub struct CreateOrder;

#[async_trait]
impl RouteHandler for CreateOrder {
    async fn handle(&self, request: RouteRequest) -> Result<HandlerOutput, DispatchError> {
        let model = OrderModel::from_json(request.body()?)?;
        tracing::debug!(attributes = model.attributes().len(), "create order");
        Err(DispatchError::not_implemented(&request.entry))
    }
}

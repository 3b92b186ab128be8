mod request;
mod response;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use application::service::{GetStockMovementsService, RecordStockMovementService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::stock::request::{CreateRequest, GetAllRequest, Transformer};
use crate::route::stock::response::Presenter;

pub trait StockRouter {
    fn route_stock(self) -> Self;
}

impl StockRouter for Router<AppModule> {
    fn route_stock(self) -> Self {
        self.route(
            "/stock-movements",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetAllRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.get_stock_movements(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.record_stock_movement(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}

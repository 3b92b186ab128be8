mod request;
mod response;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;

use application::service::{GetDashboardService, GetRentalReportService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::report::request::{GetReportRequest, Transformer};
use crate::route::report::response::Presenter;

pub trait ReportRouter {
    fn route_report(self) -> Self;
}

impl ReportRouter for Router<AppModule> {
    fn route_report(self) -> Self {
        self.route(
            "/reports/rentals",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetReportRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.get_rental_report(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/dashboard",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| async move { module.get_dashboard().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}

mod request;
mod response;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;

use application::service::GetCalendarService;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::calendar::request::{GetRequest, Transformer};
use crate::route::calendar::response::Presenter;

pub trait CalendarRouter {
    fn route_calendar(self) -> Self;
}

impl CalendarRouter for Router<AppModule> {
    fn route_calendar(self) -> Self {
        self.route(
            "/calendar",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.get_calendar(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}

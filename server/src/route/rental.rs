mod request;
mod response;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{
    CreateRentalService, GetRentalService, ReturnRentalService, UpdateRentalService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::rental::request::{
    CancelRequest, CreateRequest, GetAllRequest, GetRequest, ReturnRequest, Transformer,
    UpdateRequest,
};
use crate::route::rental::response::CreatedPresenter;

pub(super) use self::response::{Presenter as RentalPresenter, RentalResponse};

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetAllRequest>| async move {
                    Controller::new(Transformer, RentalPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.get_rentals(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, RentalPresenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move { module.get_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(RentalResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateRequest>| async move {
                    Controller::new(Transformer, RentalPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.update_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id/return",
            post(
                |State(module): State<AppModule>, Path(id): Path<Uuid>, body: Bytes| async move {
                    let req = ReturnRequest::from_body(&body).map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, RentalPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.return_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id/cancel",
            post(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, RentalPresenter)
                        .intake(CancelRequest::new(id))
                        .handle(|dto| async move { module.cancel_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}

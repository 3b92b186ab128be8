use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use application::transfer::GetRentalReportDto;
use kernel::prelude::entity::RentalStatus;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct GetReportRequest {
    from: Option<Date>,
    to: Option<Date>,
    status: Option<RentalStatus>,
    customer_id: Option<Uuid>,
}

pub struct Transformer;

impl Intake<GetReportRequest> for Transformer {
    type To = GetRentalReportDto;
    fn emit(&self, input: GetReportRequest) -> Self::To {
        GetRentalReportDto {
            from: input.from,
            to: input.to,
            status: input.status,
            customer_id: input.customer_id,
        }
    }
}

use serde::Deserialize;
use time::Date;

use application::transfer::GetCalendarDto;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct GetRequest {
    from: Date,
    to: Date,
}

pub struct Transformer;

impl Intake<GetRequest> for Transformer {
    type To = GetCalendarDto;
    fn emit(&self, GetRequest { from, to }: GetRequest) -> Self::To {
        GetCalendarDto { from, to }
    }
}

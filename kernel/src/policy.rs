use crate::entity::FinePolicy;

pub trait DependOnFinePolicy: 'static + Sync + Send {
    fn fine_policy(&self) -> &FinePolicy;
}

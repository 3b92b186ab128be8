use std::future::IntoFuture;

/// Turns a decoded request into the input of an application service.
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// Turns the output of an application service into something axum can answer with.
pub trait Exhaust<O>: 'static + Sync + Send {
    type To;
    fn emit(&self, output: O) -> Self::To;
}

pub struct Controller<T, P> {
    transformer: T,
    presenter: P,
}

impl<T, P> Controller<T, P> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
        }
    }

    pub fn intake<I>(self, input: I) -> Transformed<P, <T as Intake<I>>::To>
    where
        T: Intake<I>,
    {
        Transformed {
            transformed: self.transformer.emit(input),
            presenter: self.presenter,
        }
    }

    /// Runs a service that takes no request input.
    pub async fn bypass<F, Fut, O, E>(self, f: F) -> Result<<P as Exhaust<O>>::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f().await?))
    }
}

pub struct Transformed<P, D> {
    transformed: D,
    presenter: P,
}

impl<P, D> Transformed<P, D> {
    pub async fn handle<F, Fut, O, E>(self, f: F) -> Result<<P as Exhaust<O>>::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f(self.transformed).await?))
    }
}

#[cfg(test)]
mod test {
    use super::{Controller, Exhaust, Intake};

    struct Doubler;

    impl Intake<i32> for Doubler {
        type To = i64;
        fn emit(&self, input: i32) -> Self::To {
            i64::from(input) * 2
        }
    }

    struct Printer;

    impl Exhaust<i64> for Printer {
        type To = String;
        fn emit(&self, output: i64) -> Self::To {
            output.to_string()
        }
    }

    #[tokio::test]
    async fn intake_feeds_handler_and_presenter() {
        let out = Controller::new(Doubler, Printer)
            .intake(21)
            .handle(|doubled| async move { Ok::<_, ()>(doubled + 1) })
            .await;
        assert_eq!(out, Ok("43".to_string()));
    }

    #[tokio::test]
    async fn handler_errors_skip_the_presenter() {
        let out = Controller::new(Doubler, Printer)
            .intake(1)
            .handle(|_| async move { Err::<i64, _>("boom") })
            .await;
        assert_eq!(out, Err("boom"));
    }

    #[tokio::test]
    async fn bypass_needs_no_input() {
        let out = Controller::new((), Printer)
            .bypass(|| async { Ok::<_, ()>(7_i64) })
            .await;
        assert_eq!(out, Ok("7".to_string()));
    }
}

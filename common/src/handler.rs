//! [`Handler`] abstractions.

use std::future::Future;

/// Asynchronous operation executed against some `Args`.
///
/// Queries, commands and store operations are all expressed as [`Handler`]s
/// parametrized by their argument type.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}

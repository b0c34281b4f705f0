use std::borrow::Cow;

/// Errors raised by tenant resolution, the domain registry and the tenant context.
///
/// An unknown hostname is not an error: resolvers report it as
/// [`Resolution::NotFound`](crate::resolver::Resolution::NotFound).
#[ehub_derive::ehub_error]
pub enum TenancyError {
    /// A tenant config or registration request failed validation.
    #[error("Invalid tenant config{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Domain already registered{}: {domain}", format_context(.context))]
    DuplicateDomain { domain: String, context: Option<Cow<'static, str>> },

    #[error("Unknown domain{}: {domain}", format_context(.context))]
    UnknownDomain { domain: String, context: Option<Cow<'static, str>> },

    /// Resolution could not be attempted at all (backend unreachable, timeout, ...).
    #[error("Tenant lookup failed{}: {message}", format_context(.context))]
    Transport { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Tenant context already initialized{}", format_context(.context))]
    AlreadyInitialized { context: Option<Cow<'static, str>> },

    #[error("No tenant resolved{}", format_context(.context))]
    NoTenant { context: Option<Cow<'static, str>> },

    #[error("Tenant context disposed{}", format_context(.context))]
    Disposed { context: Option<Cow<'static, str>> },

    #[error("Internal tenancy error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl TenancyError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    /// Builds a [`TenancyError::Transport`]; meant for resolver implementations.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Transport { message: message.into(), context: None }
    }
}

//! Extensions for [`Result`] type.

/// Extensions for the [`Result`] type.
pub trait ResultEx<T, E> {
    /// Ignores the subset of the error for which `check` returns true,
    /// returning `None` instead.
    ///
    /// # Examples
    /// ```no_run
    /// # use std::fs;
    /// # use std::io::ErrorKind;
    /// use judge_stdx::result::ResultEx;
    /// assert_eq!(
    ///     fs::read_to_string("foo.txt").ignore(
    ///         |e| e.kind() == ErrorKind::NotFound,
    ///     )?,
    ///     Some(String::from("foo")),
    /// );
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    fn ignore<F>(self, check: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&E) -> bool;

    /// Ignores the subset of the error for which `check` returns true,
    /// returning `Default::default` instead.
    fn ignore_default<F>(self, check: F) -> Result<T, E>
    where
        T: Default,
        F: FnOnce(&E) -> bool;

    /// Ignores the subset of the error for which `check` returns true,
    /// returning the result of `value` instead.
    fn ignore_with<F, G>(self, check: F, value: G) -> Result<T, E>
    where
        F: FnOnce(&E) -> bool,
        G: FnOnce(&E) -> T;
}

impl<T, E> ResultEx<T, E> for Result<T, E> {
    fn ignore<F>(self, check: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&E) -> bool,
    {
        self.map(Some).ignore_with(check, |_| None)
    }

    fn ignore_default<F>(self, check: F) -> Result<T, E>
    where
        T: Default,
        F: FnOnce(&E) -> bool,
    {
        self.ignore_with(check, |_| T::default())
    }

    fn ignore_with<F, G>(self, check: F, value: G) -> Result<T, E>
    where
        F: FnOnce(&E) -> bool,
        G: FnOnce(&E) -> T,
    {
        match self {
            Err(err) if check(&err) => Ok(value(&err)),
            x => x,
        }
    }
}

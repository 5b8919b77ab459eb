/// forwards a log event to whichever logging backend is enabled
macro_rules! log_event {
	($level:ident, $($expr:expr),*) => (
		#[cfg(feature = "tracing")]
		{
			tracing::$level!($($expr),*);
		}

		#[cfg(feature = "log")]
		{
			log::$level!($($expr),*);
		}

		#[cfg(not(any(feature = "tracing", feature = "log")))]
		{
			log_allow_unused!($($expr),*);
		}
	)
}

/// creates a log on the trace level
macro_rules! trace {
	($($expr:expr),*) => (
		log_event!(trace, $($expr),*)
	)
}

/// creates a log on the debug level
macro_rules! debug {
	($($expr:expr),*) => (
		log_event!(debug, $($expr),*)
	)
}

/// creates a log on the warn level
macro_rules! warn {
	($($expr:expr),*) => (
		log_event!(warn, $($expr),*)
	)
}

/// allow expressions to be unused
#[allow(unused)]
macro_rules! log_allow_unused {
	($($expr:expr),*) => (
		$(
			let _ = $expr;
		)*
	)
}

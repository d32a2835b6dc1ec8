use std::any::Any;

/// Describes one field of a record: its name, optional environment key and
/// accessors to its storage.
///
/// Fields without a key are listed so declaration order is complete, but
/// decode and encode never touch them.
pub struct Field<R> {
	name: &'static str,
	key: Option<&'static str>,
	type_name: &'static str,
	get: fn(&R) -> &dyn Any,
	get_mut: fn(&mut R) -> &mut dyn Any,
}

impl<R> Field<R> {
	pub fn new(
		name: &'static str,
		key: Option<&'static str>,
		type_name: &'static str,
		get: fn(&R) -> &dyn Any,
		get_mut: fn(&mut R) -> &mut dyn Any,
	) -> Self {
		Field {
			name,
			key,
			type_name,
			get,
			get_mut,
		}
	}

	/// The Rust field name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// The environment key this field is tagged with, if any.
	pub fn key(&self) -> Option<&'static str> {
		self.key
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn value<'a>(&self, record: &'a R) -> &'a dyn Any {
		(self.get)(record)
	}

	pub fn value_mut<'a>(&self, record: &'a mut R) -> &'a mut dyn Any {
		(self.get_mut)(record)
	}
}

impl<R> std::fmt::Debug for Field<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("key", &self.key)
			.field("type_name", &self.type_name)
			.finish()
	}
}

/// A record whose fields can be decoded from and encoded to the environment.
///
/// Usually implemented with [`env_record!`](crate::env_record).
pub trait EnvRecord: Sized + 'static {
	/// All fields in declaration order.
	fn fields() -> Vec<Field<Self>>;
}

/// Declare a struct and implement [`EnvRecord`] for it.
///
/// A field followed by `=> "KEY"` is tagged with environment key `KEY`.
/// Fields without a tag are declared normally and ignored by the mapper.
///
/// ```
/// envtag::env_record! {
///     #[derive(Debug, Default)]
///     pub struct ServerConfig {
///         pub host: String => "HOST",
///         pub port: u16 => "PORT",
///         pub debug: bool => "DEBUG",
///         /// Not read from the environment.
///         pub label: String,
///     }
/// }
///
/// let fields = <ServerConfig as envtag::EnvRecord>::fields();
/// assert_eq!(fields[1].key(), Some("PORT"));
/// assert_eq!(fields[3].key(), None);
/// ```
#[macro_export]
macro_rules! env_record {
	(@key) => {
		::core::option::Option::None
	};
	(@key $key:literal) => {
		::core::option::Option::Some($key)
	};
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$field_meta:meta])*
				$field_vis:vis $field:ident : $ty:ty $(=> $key:literal)?
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$(
				$(#[$field_meta])*
				$field_vis $field: $ty,
			)*
		}

		impl $crate::EnvRecord for $name {
			fn fields() -> ::std::vec::Vec<$crate::Field<Self>> {
				::std::vec![
					$({
						fn get(record: &$name) -> &dyn ::core::any::Any {
							&record.$field
						}
						fn get_mut(record: &mut $name) -> &mut dyn ::core::any::Any {
							&mut record.$field
						}
						$crate::Field::new(
							::core::stringify!($field),
							$crate::env_record!(@key $($key)?),
							::core::any::type_name::<$ty>(),
							get,
							get_mut,
						)
					}),*
				]
			}
		}
	};
}

//! Named instantiations of the generic containers for each primitive value kind.

use crate::{Binding, ChangeListener, Property, ReadOnlyWrapper};

macro_rules! primitive_aliases {
    ($($value:ty => $property:ident, $binding:ident, $wrapper:ident, $listener:ident;)*) => {
        $(
            #[doc = concat!("A `", stringify!($value), "` property.")]
            pub type $property = Property<$value>;
            #[doc = concat!("A binding producing `", stringify!($value), "` values.")]
            pub type $binding = Binding<$value>;
            #[doc = concat!("A read-only view of a `", stringify!($value), "` property.")]
            pub type $wrapper = ReadOnlyWrapper<$value>;
            #[doc = concat!("A listener for `", stringify!($value), "` changes.")]
            pub type $listener = ChangeListener<$value>;
        )*
    };
}

primitive_aliases! {
    bool => BooleanProperty, BooleanBinding, ReadOnlyBooleanWrapper, BooleanChangeListener;
    i8 => ByteProperty, ByteBinding, ReadOnlyByteWrapper, ByteChangeListener;
    u16 => CharProperty, CharBinding, ReadOnlyCharWrapper, CharChangeListener;
    i16 => ShortProperty, ShortBinding, ReadOnlyShortWrapper, ShortChangeListener;
    i32 => IntProperty, IntBinding, ReadOnlyIntWrapper, IntChangeListener;
    i64 => LongProperty, LongBinding, ReadOnlyLongWrapper, LongChangeListener;
    f32 => FloatProperty, FloatBinding, ReadOnlyFloatWrapper, FloatChangeListener;
    f64 => DoubleProperty, DoubleBinding, ReadOnlyDoubleWrapper, DoubleChangeListener;
}

/// A property holding an optional value; `None` is the initial value.
pub type ObjectProperty<T> = Property<Option<T>>;
pub type ReadOnlyObjectWrapper<T> = ReadOnlyWrapper<Option<T>>;
pub type ObjectChangeListener<T> = ChangeListener<Option<T>>;

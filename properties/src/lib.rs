/*!
Typed observable properties with validation, change listeners and one-way binding.

# Model
- [`ObservableValue`] - readable, with change listeners
- [`WritableValue`] - observable and directly settable
- [`Property`] - validated writable value that can be bound to another observable
- [`Binding`] - read-only value derived from one upstream observable through a converter
- [`ReadOnlyWrapper`] - read-only view of a property

Everything is synchronous: listeners run on the caller's thread, in registration order, before
`set` (or the upstream change that triggered them) returns. A failing listener or validator aborts
the round and its error goes back to that caller.

# Basic usage

```rust
use osmerion_properties::*;

let volume = Property::with_validator(0, |v: i32| v.clamp(0, 100));
volume.add_listener(ChangeListener::new(|_, old, new| println!("volume: {old} -> {new}")));

assert_eq!(volume.set(150).unwrap(), 0); // prints "volume: 0 -> 100"
assert_eq!(volume.get(), 100);
assert_eq!(volume.set(100).unwrap(), 100); // no change, no notification
```

# Binding

```rust
use osmerion_properties::*;

let source = Property::new(1);
let target = Property::with_validator(0, |v: i32| v * 10);

target.bind(&source).unwrap();
assert_eq!(target.get(), 0); // binding does not pull the current value
source.set(2).unwrap();
assert_eq!(target.get(), 20);
assert!(target.set(5).is_err()); // bound properties reject direct writes

target.unbind().unwrap();
target.set(5).unwrap();
assert_eq!(target.get(), 50);
```
*/

mod binding;
mod channel;
mod error;
mod listener;
mod primitive;
mod property;
mod read_only;
mod report;
mod value;

pub use binding::*;
pub use channel::*;
pub use error::*;
pub use listener::*;
pub use primitive::*;
pub use property::*;
pub use read_only::*;
pub use report::*;
pub use value::*;

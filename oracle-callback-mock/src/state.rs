use crate::msg::ReceivedAnswer;
use cw_storage_plus::Item;

pub const RECEIVED: Item<Vec<ReceivedAnswer>> = Item::new("received");

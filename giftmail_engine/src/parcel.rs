//! Parcels and the per-recipient mail queue.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::item::ItemStack;

/// An outgoing gift, optionally earmarked to complete a quest.
///
/// Parcels are immutable once queued and are consumed by exactly one delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    gift: ItemStack,
    quest_id: Option<String>,
}

impl Parcel {
    pub fn new(gift: ItemStack, quest_id: Option<String>) -> Self {
        Self { gift, quest_id }
    }

    pub fn gift(&self) -> &ItemStack {
        &self.gift
    }

    pub fn quest_id(&self) -> Option<&str> {
        self.quest_id.as_deref()
    }
}

/// Pending parcels for one recipient, in the order they were sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub recipient: String,
    pub parcels: VecDeque<Parcel>,
}

/// Every pending parcel, grouped by recipient in order of first use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailQueue {
    boxes: Vec<Mailbox>,
}

impl MailQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parcel to the recipient's mailbox.
    pub fn enqueue(&mut self, recipient: &str, parcel: Parcel) {
        if let Some(mailbox) = self.boxes.iter_mut().find(|b| b.recipient == recipient) {
            mailbox.parcels.push_back(parcel);
        } else {
            self.boxes.push(Mailbox {
                recipient: recipient.to_string(),
                parcels: VecDeque::from([parcel]),
            });
        }
    }

    /// Total number of pending parcels.
    pub fn len(&self) -> usize {
        self.boxes.iter().map(|b| b.parcels.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pending parcels for one recipient.
    pub fn for_recipient(&self, recipient: &str) -> impl Iterator<Item = &Parcel> {
        self.boxes
            .iter()
            .filter(move |b| b.recipient == recipient)
            .flat_map(|b| b.parcels.iter())
    }

    /// Units of one item at one quality already promised to pending parcels.
    pub fn queued_quantity(&self, item_id: &str, quality: u8) -> u32 {
        self.boxes
            .iter()
            .flat_map(|b| b.parcels.iter())
            .map(Parcel::gift)
            .filter(|g| g.id == item_id && g.quality == quality)
            .map(|g| g.stack)
            .sum()
    }

    /// Pending parcels in delivery order for the given recipient registration order.
    pub fn pending<'a>(&'a self, registration: &[String]) -> Vec<(&'a str, &'a Parcel)> {
        self.ordered_boxes(registration)
            .into_iter()
            .flat_map(|b| b.parcels.iter().map(move |p| (b.recipient.as_str(), p)))
            .collect()
    }

    /// Empties the queue, returning every parcel in delivery order: registered recipients
    /// first (registration order), then any other recipients in order of first enqueue.
    /// Parcels for one recipient keep their enqueue order.
    pub fn drain_ordered(&mut self, registration: &[String]) -> Vec<(String, Parcel)> {
        let order: Vec<usize> = self.delivery_order(registration);
        let mut boxes: Vec<Option<Mailbox>> = std::mem::take(&mut self.boxes).into_iter().map(Some).collect();
        let mut drained = Vec::new();
        for idx in order {
            if let Some(mailbox) = boxes[idx].take() {
                let recipient = mailbox.recipient;
                drained.extend(mailbox.parcels.into_iter().map(|p| (recipient.clone(), p)));
            }
        }
        drained
    }

    fn ordered_boxes(&self, registration: &[String]) -> Vec<&Mailbox> {
        self.delivery_order(registration).into_iter().map(|idx| &self.boxes[idx]).collect()
    }

    /// Indices into `boxes` in delivery order.
    fn delivery_order(&self, registration: &[String]) -> Vec<usize> {
        let mut order: Vec<usize> = registration
            .iter()
            .filter_map(|id| self.boxes.iter().position(|b| &b.recipient == id))
            .collect();
        for idx in 0..self.boxes.len() {
            if !order.contains(&idx) {
                order.push(idx);
            }
        }
        order
    }
}

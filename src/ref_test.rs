// Flat reference model, a sorted vector of keys with duplicates
// retained, against which the tree is compared.
struct RefKeys {
    keys: Vec<i64>, // kept in sort order
}

impl RefKeys {
    fn new() -> RefKeys {
        RefKeys { keys: vec![] }
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn insert(&mut self, key: i64) {
        let off = match self.keys.binary_search(&key) {
            Ok(off) => off,
            Err(off) => off,
        };
        self.keys.insert(off, key);
    }

    // remove one instance of key, false when absent.
    fn delete(&mut self, key: i64) -> bool {
        match self.keys.binary_search(&key) {
            Ok(off) => {
                self.keys.remove(off);
                true
            }
            Err(_) => false,
        }
    }

    fn contains(&self, key: i64) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    fn iter(&self) -> std::vec::IntoIter<i64> {
        self.keys.clone().into_iter()
    }

    fn range(&self, low: Bound<i64>, high: Bound<i64>) -> std::vec::IntoIter<i64> {
        self.keys
            .iter()
            .cloned()
            .filter(|key| within(*key, &low, &high))
            .collect::<Vec<i64>>()
            .into_iter()
    }

    fn reverse(&self, low: Bound<i64>, high: Bound<i64>) -> std::vec::IntoIter<i64> {
        self.keys
            .iter()
            .rev()
            .cloned()
            .filter(|key| within(*key, &low, &high))
            .collect::<Vec<i64>>()
            .into_iter()
    }
}

fn within(key: i64, low: &Bound<i64>, high: &Bound<i64>) -> bool {
    let lok = match low {
        Bound::Included(low) => key >= *low,
        Bound::Excluded(low) => key > *low,
        Bound::Unbounded => true,
    };
    let hok = match high {
        Bound::Included(high) => key <= *high,
        Bound::Excluded(high) => key < *high,
        Bound::Unbounded => true,
    };
    lok && hok
}

fn random_low_high(size: usize) -> (Bound<i64>, Bound<i64>) {
    let size = size as u64;
    let low = (random::<u64>() % size) as i64;
    let high = (random::<u64>() % size) as i64;
    let low = match random::<u8>() % 3 {
        0 => Bound::Included(low),
        1 => Bound::Excluded(low),
        2 => Bound::Unbounded,
        _ => unreachable!(),
    };
    let high = match random::<u8>() % 3 {
        0 => Bound::Included(high),
        1 => Bound::Excluded(high),
        2 => Bound::Unbounded,
        _ => unreachable!(),
    };
    (low, high)
}

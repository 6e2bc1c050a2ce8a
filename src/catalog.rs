//! Hard-coded demo data behind the visualizer views.
//!
//! The 3D canvas renders a fixed showcase of boxes with packaging-layer
//! metadata, the map overlay renders simulated delivery clusters around
//! Mumbai, and the dashboard shows mock store stats. None of this is wired
//! to the placement planner; the showcase has its own scene placements.

use serde::Serialize;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;

use crate::types::Fragility;

/// One packaging layer of a showcase box, outermost first.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct PackagingLayer {
    pub layer: &'static str,
    pub description: &'static str,
    /// Display color as a hex string, e.g. "#8B4513".
    pub color: &'static str,
}

/// Scene placement of a showcase box on the 3D canvas.
#[derive(Clone, Copy, Debug, Serialize, ToSchema)]
pub struct ScenePlacement {
    #[schema(value_type = [f64; 3], example = json!([1.3, -2.5, 1.0]))]
    pub position: (f64, f64, f64),
    #[schema(value_type = [f64; 3], example = json!([4.0, 2.0, 3.0]))]
    pub scale: (f64, f64, f64),
}

/// A box from the fixed showcase catalog.
///
/// Only the boxes rendered on the canvas carry a scene placement; the rest
/// exist solely for the detail view.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ShowcaseBox {
    pub id: u32,
    pub name: &'static str,
    pub contents: &'static str,
    pub packaging: Vec<PackagingLayer>,
    pub dimensions_label: &'static str,
    pub weight_label: &'static str,
    pub fragility: Fragility,
    pub handling_instructions: &'static str,
    pub scene_placement: Option<ScenePlacement>,
}

/// Delivery status of an order cluster on the map overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub enum ClusterStatus {
    HighPriority,
    Standard,
    Delivered,
    Processing,
    OutForDelivery,
    Pending,
}

impl ClusterStatus {
    /// Marker fill color for this status.
    pub const fn marker_color(&self) -> &'static str {
        match self {
            ClusterStatus::HighPriority => "#ef4444",
            ClusterStatus::Standard => "#eab308",
            ClusterStatus::Delivered => "#22c55e",
            ClusterStatus::Processing => "#3b82f6",
            ClusterStatus::OutForDelivery => "#f97316",
            ClusterStatus::Pending => "#8b5cf6",
        }
    }

    /// Status label shown in the marker popup.
    pub const fn label(&self) -> &'static str {
        match self {
            ClusterStatus::HighPriority => "High Priority",
            ClusterStatus::Standard => "Standard",
            ClusterStatus::Delivered => "Delivered",
            ClusterStatus::Processing => "Processing",
            ClusterStatus::OutForDelivery => "Out for Delivery",
            ClusterStatus::Pending => "Pending",
        }
    }
}

/// A simulated cluster of delivery orders.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct OrderCluster {
    pub id: u32,
    pub lat: f64,
    pub lng: f64,
    pub status: ClusterStatus,
    pub count: u32,
    pub area: &'static str,
}

impl OrderCluster {
    /// Marker radius in pixels, bucketed by order count for street-level
    /// clustering.
    pub const fn marker_radius(&self) -> u32 {
        if self.count > 12 {
            18
        } else if self.count > 8 {
            14
        } else if self.count > 5 {
            10
        } else {
            8
        }
    }
}

/// Status of a recent order on the dashboard.
#[derive(Clone, Copy, Debug, Serialize, ToSchema)]
pub enum OrderStatus {
    Completed,
    Processing,
    Shipped,
}

/// One row of the dashboard's recent-orders panel.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct RecentOrder {
    pub id: &'static str,
    pub description: &'static str,
    pub amount: f64,
    pub status: OrderStatus,
}

/// Mock store stats for the dashboard.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_orders: u32,
    pub total_revenue: u32,
    pub total_customers: u32,
    pub total_products: u32,
    pub recent_orders: Vec<RecentOrder>,
}

fn layer(layer: &'static str, description: &'static str, color: &'static str) -> PackagingLayer {
    PackagingLayer {
        layer,
        description,
        color,
    }
}

/// The fixed showcase catalog.
pub fn showcase_boxes() -> Vec<ShowcaseBox> {
    vec![
        ShowcaseBox {
            id: 1,
            name: "Electronics Package",
            contents: "PlayStation 5 Digital Edition",
            packaging: vec![
                layer("Outer Cardboard Box", "Corrugated cardboard protection", "#8B4513"),
                layer("Foam Padding", "High-density foam insert", "#FFFACD"),
                layer("Anti-static Wrap", "Anti-static plastic wrap", "#E6E6FA"),
                layer("Product", "PlayStation 5 Digital Edition", "#F8F8FF"),
            ],
            dimensions_label: "40cm x 20cm x 30cm",
            weight_label: "4.2 kg",
            fragility: Fragility::Medium,
            handling_instructions: "Keep upright, handle with care",
            scene_placement: Some(ScenePlacement {
                position: (1.3, -2.5, 1.0),
                scale: (4.0, 2.0, 3.0),
            }),
        },
        ShowcaseBox {
            id: 2,
            name: "Fragile Items",
            contents: "LED Screen Display",
            packaging: vec![
                layer("Heavy-duty Carton", "Heavy-duty shipping box", "#8B4513"),
                layer("Corner Protectors", "Foam corner guards", "#FFFACD"),
                layer("Bubble Wrap", "Air-cushioned protection", "#E0E0E0"),
                layer("Screen Panel", "LED Display Screen", "#2F4F4F"),
            ],
            dimensions_label: "60cm x 90cm x 5cm",
            weight_label: "8.7 kg",
            fragility: Fragility::High,
            handling_instructions: "THIS SIDE UP - Fragile electronics inside",
            scene_placement: Some(ScenePlacement {
                position: (3.33, -1.7, 0.0),
                scale: (1.0, 6.0, 5.0),
            }),
        },
        ShowcaseBox {
            id: 3,
            name: "Electronics Package",
            contents: "Apple Ipad Air",
            packaging: vec![
                layer("Outer Cardboard Box", "Corrugated cardboard protection", "#8B4513"),
                layer("Foam Padding", "High-density foam insert", "#FFFACD"),
                layer("Anti-static Packing", "Anti-static bubble wrap", "#E0E0E0"),
                layer("Bubble Wrap", "Air-cushioned protection", "#2F4F4F"),
            ],
            dimensions_label: "24cm x 18cm x 0.7cm",
            weight_label: "0.5 kg",
            fragility: Fragility::High,
            handling_instructions: "THIS SIDE UP - Fragile electronics inside",
            scene_placement: None,
        },
        ShowcaseBox {
            id: 4,
            name: "Books and Media",
            contents: "Thriller Novel Collection",
            packaging: vec![
                layer("Reinforced Cardboard Box", "Sturdy protection for books", "#8B4513"),
                layer("Bubble Wrap", "Air-cushioned protection", "#FFFACD"),
                layer("Shrink Wrap", "Tight-fitting plastic wrap", "#E0E0E0"),
                layer("Book Collection", "Collection of thriller novels", "#2F4F4F"),
            ],
            dimensions_label: "24cm x 18cm x 15cm",
            weight_label: "4.5 kg",
            fragility: Fragility::Low,
            handling_instructions: "Handle with care - Books inside",
            scene_placement: None,
        },
        ShowcaseBox {
            id: 5,
            name: "Clothes and Apparel",
            contents: "Football Jersey Set",
            packaging: vec![
                layer("Poly Mailer Bag", "Lightweight and durable bag", "#8B4513"),
                layer("Bubble Wrap", "Air-cushioned protection", "#FFFACD"),
                layer("Clothing Tag", "Tag with size and care instructions", "#E0E0E0"),
                layer("Football Jersey Set", "Set of football jerseys", "#2F4F4F"),
            ],
            dimensions_label: "24cm x 45cm x 15cm",
            weight_label: "0.2 kg",
            fragility: Fragility::Low,
            handling_instructions: "Handle with care - Clothing inside",
            scene_placement: None,
        },
        ShowcaseBox {
            id: 6,
            name: "Sports Equipment",
            contents: "Yoga Mat",
            packaging: vec![
                layer("Plastic Wrap", "Protective plastic covering", "#8B4513"),
                layer("Cardboard Sleeve", "Sturdy cardboard protection", "#FFFACD"),
                layer("Yoga Mat", "High-density foam mat", "#E0E0E0"),
            ],
            dimensions_label: "24cm x 45cm x 15cm",
            weight_label: "0.2 kg",
            fragility: Fragility::Low,
            handling_instructions: "Handle with care - Sports Equipment inside",
            scene_placement: None,
        },
    ]
}

/// Looks up a showcase box by id.
pub fn showcase_box(id: u32) -> Option<ShowcaseBox> {
    showcase_boxes().into_iter().find(|b| b.id == id)
}

fn cluster(
    id: u32,
    lat: f64,
    lng: f64,
    status: ClusterStatus,
    count: u32,
    area: &'static str,
) -> OrderCluster {
    OrderCluster {
        id,
        lat,
        lng,
        status,
        count,
        area,
    }
}

/// Simulated delivery clusters around Mumbai.
pub fn order_clusters() -> Vec<OrderCluster> {
    use ClusterStatus::*;
    vec![
        // Urgent deliveries, Bandra West
        cluster(1, 19.0596, 72.8295, HighPriority, 8, "Linking Road, Bandra West"),
        cluster(2, 19.0598, 72.8298, HighPriority, 5, "Hill Road, Bandra West"),
        cluster(3, 19.0594, 72.8292, HighPriority, 6, "Turner Road, Bandra West"),
        // Regular deliveries, Andheri East
        cluster(4, 19.1136, 72.8697, Standard, 12, "Chakala Road, Andheri East"),
        cluster(5, 19.1138, 72.8695, Standard, 9, "J.B. Nagar, Andheri East"),
        cluster(6, 19.1134, 72.8699, Standard, 11, "Marol Naka, Andheri East"),
        cluster(7, 19.1140, 72.8692, Standard, 7, "MIDC Road, Andheri East"),
        // Completed deliveries, Powai
        cluster(8, 19.1197, 72.9056, Delivered, 15, "Hiranandani Gardens, Powai"),
        cluster(9, 19.1195, 72.9058, Delivered, 13, "Central Avenue, Powai"),
        cluster(10, 19.1199, 72.9054, Delivered, 14, "Galleria Mall Area, Powai"),
        // Orders being processed, Worli
        cluster(11, 19.0176, 72.8179, Processing, 4, "Annie Besant Road, Worli"),
        cluster(12, 19.0178, 72.8181, Processing, 6, "Dr. E Moses Road, Worli"),
        cluster(13, 19.0174, 72.8177, Processing, 5, "Pandurang Budhkar Marg, Worli"),
        // Juhu
        cluster(14, 19.1075, 72.8263, OutForDelivery, 3, "Juhu Tara Road, Juhu"),
        cluster(15, 19.1077, 72.8265, OutForDelivery, 4, "JVPD Scheme, Juhu"),
        cluster(16, 19.1073, 72.8261, OutForDelivery, 2, "Gulmohar Road, Juhu"),
        // Colaba, very close street clustering
        cluster(17, 18.9067, 72.8147, Pending, 7, "Colaba Causeway"),
        cluster(18, 18.9069, 72.8149, Pending, 5, "Mandlik Road, Colaba"),
        cluster(19, 18.9065, 72.8145, Pending, 8, "Arthur Bunder Road, Colaba"),
        cluster(20, 18.9071, 72.8151, Pending, 4, "Shahid Bhagat Singh Road, Colaba"),
    ]
}

/// Mock dashboard stats.
pub fn dashboard_stats() -> DashboardStats {
    DashboardStats {
        total_orders: 1_234,
        total_revenue: 45_678,
        total_customers: 89_456,
        total_products: 12_345,
        recent_orders: vec![
            RecentOrder {
                id: "#ORDER-001",
                description: "Electronics - iPhone 15",
                amount: 999.99,
                status: OrderStatus::Completed,
            },
            RecentOrder {
                id: "#ORDER-002",
                description: "Groceries - Weekly Shopping",
                amount: 127.45,
                status: OrderStatus::Processing,
            },
            RecentOrder {
                id: "#ORDER-003",
                description: "Home & Garden - Furniture",
                amount: 549.99,
                status: OrderStatus::Shipped,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showcase_ids_are_unique_and_lookup_works() {
        let boxes = showcase_boxes();
        assert_eq!(boxes.len(), 6);
        let mut ids: Vec<u32> = boxes.iter().map(|b| b.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);

        let found = showcase_box(2).expect("box 2 exists");
        assert_eq!(found.contents, "LED Screen Display");
        assert!(showcase_box(99).is_none());
    }

    #[test]
    fn only_canvas_boxes_carry_scene_placements() {
        let boxes = showcase_boxes();
        let placed: Vec<u32> = boxes
            .iter()
            .filter(|b| b.scene_placement.is_some())
            .map(|b| b.id)
            .collect();
        assert_eq!(placed, vec![1, 2]);
    }

    #[test]
    fn marker_radius_buckets_by_count() {
        let make = |count| cluster(0, 0.0, 0.0, ClusterStatus::Standard, count, "test");
        assert_eq!(make(15).marker_radius(), 18);
        assert_eq!(make(12).marker_radius(), 14);
        assert_eq!(make(9).marker_radius(), 14);
        assert_eq!(make(6).marker_radius(), 10);
        assert_eq!(make(5).marker_radius(), 8);
        assert_eq!(make(2).marker_radius(), 8);
    }

    #[test]
    fn every_status_has_a_color_and_label() {
        use ClusterStatus::*;
        for status in [HighPriority, Standard, Delivered, Processing, OutForDelivery, Pending] {
            assert!(status.marker_color().starts_with('#'));
            assert!(!status.label().is_empty());
        }
    }

    #[test]
    fn cluster_data_covers_all_statuses() {
        let clusters = order_clusters();
        assert_eq!(clusters.len(), 20);
        use ClusterStatus::*;
        for status in [HighPriority, Standard, Delivered, Processing, OutForDelivery, Pending] {
            assert!(clusters.iter().any(|c| c.status == status));
        }
    }

    #[test]
    fn dashboard_stats_are_fixed() {
        let stats = dashboard_stats();
        assert_eq!(stats.total_orders, 1_234);
        assert_eq!(stats.recent_orders.len(), 3);
    }
}

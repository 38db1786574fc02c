//! Static catalog of study topics offered to clients.

use serde::Serialize;

/// A topic a student can tag a question with.
///
/// The `name` is what clients send back as the question's `topic`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Ordered topic list served by `GET /api/topics`.
pub const TOPICS: &[Topic] = &[
    Topic {
        id: "docker",
        name: "Docker and Containers",
        description: "Containers, images, volumes and networks",
    },
    Topic {
        id: "aws",
        name: "AWS - Basic Services",
        description: "EC2, S3, RDS, Lambda and other foundational services",
    },
    Topic {
        id: "cicd",
        name: "CI/CD and GitHub Actions",
        description: "Continuous integration and delivery, automated pipelines",
    },
    Topic {
        id: "kubernetes",
        name: "Kubernetes",
        description: "Container orchestration, pods, services and deployments",
    },
    Topic {
        id: "terraform",
        name: "Terraform and IaC",
        description: "Infrastructure as Code, automated provisioning",
    },
    Topic {
        id: "security",
        name: "Cloud Security",
        description: "IAM, VPC, Security Groups, SSL/TLS",
    },
    Topic {
        id: "monitoring",
        name: "Monitoring and Logs",
        description: "CloudWatch, Prometheus, Grafana, ELK Stack",
    },
    Topic {
        id: "microservices",
        name: "Microservices Architecture",
        description: "Design patterns, service communication, API Gateway",
    },
];
